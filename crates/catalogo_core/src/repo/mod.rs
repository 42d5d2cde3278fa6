//! Repository layer for catalog persistence.
//!
//! # Responsibility
//! - Define the data access contract for `Produto` records.
//! - Isolate SQLite statement details from the interactive shell.
//!
//! # Invariants
//! - Write paths only accept already-validated `Produto` values.
//! - Not-found is a result (`Option`/`bool`), never an error.

pub mod produto_repo;
