//! Core domain logic for the product catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, with_db, DbError, DbResult, DEFAULT_DB_PATH};
pub use logging::{default_log_level, init_logging};
pub use model::produto::{
    FieldViolation, Produto, ProdutoId, ProdutoValidationError, NOME_MAX_CHARS,
};
pub use repo::produto_repo::{ProdutoRepository, RepoError, RepoResult, SqliteProdutoRepo};
