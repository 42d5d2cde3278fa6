//! Produto repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `produtos` table as the sole point of contact
//!   between the domain model and the store.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation acquires a fresh scoped connection and performs exactly
//!   one statement; no connection is held across statements.
//! - Read paths reconstruct rows through the validating constructor and
//!   reject invalid persisted state instead of masking it.

use crate::db::{with_db, DbError};
use crate::model::produto::{Produto, ProdutoId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Column list shared by all read statements. Must stay in agreement with
/// the schema created by db/migrations/0001_produtos.sql.
const PRODUTO_SELECT_SQL: &str = "SELECT id, nome, preco, estoque FROM produtos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    MissingTable(&'static str),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted produto data: {message}"),
            Self::MissingTable(table) => write!(f, "store is missing required table `{table}`"),
            Self::MissingColumn { table, column } => {
                write!(f, "store table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingTable(_) | Self::MissingColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog CRUD operations.
pub trait ProdutoRepository {
    /// Inserts a new row and returns the store-assigned identifier.
    ///
    /// Any `id` carried by the input is ignored.
    fn add(&self, produto: &Produto) -> RepoResult<ProdutoId>;
    /// Gets one produto by id. `None` when no row matches.
    fn get(&self, id: ProdutoId) -> RepoResult<Option<Produto>>;
    /// Gets every produto. Row order is store-defined and must not be
    /// relied upon.
    fn get_all(&self) -> RepoResult<Vec<Produto>>;
    /// Overwrites `nome`, `preco` and `estoque` for the row matching the
    /// produto's id. Returns whether any row was matched; never creates one.
    fn update(&self, produto: &Produto) -> RepoResult<bool>;
    /// Removes the row matching `id`. Returns whether a row was removed.
    fn delete(&self, id: ProdutoId) -> RepoResult<bool>;
}

/// SQLite-backed produto repository.
///
/// Holds only the store path; each operation opens and closes its own
/// scoped connection.
pub struct SqliteProdutoRepo {
    db_path: PathBuf,
}

impl SqliteProdutoRepo {
    /// Opens the repository over the given store path.
    ///
    /// Applies schema bootstrap idempotently and verifies the `produtos`
    /// table shape before returning.
    pub fn open(db_path: impl Into<PathBuf>) -> RepoResult<Self> {
        let repo = Self {
            db_path: db_path.into(),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Returns the store path this repository operates on.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn ensure_schema(&self) -> RepoResult<()> {
        with_db(&self.db_path, |conn| {
            if !table_exists(conn, "produtos")? {
                return Err(RepoError::MissingTable("produtos"));
            }
            for column in ["id", "nome", "preco", "estoque"] {
                if !table_has_column(conn, "produtos", column)? {
                    return Err(RepoError::MissingColumn {
                        table: "produtos",
                        column,
                    });
                }
            }
            Ok(())
        })
    }
}

impl ProdutoRepository for SqliteProdutoRepo {
    fn add(&self, produto: &Produto) -> RepoResult<ProdutoId> {
        with_db(&self.db_path, |conn| {
            conn.execute(
                "INSERT INTO produtos (nome, preco, estoque) VALUES (?1, ?2, ?3);",
                params![produto.nome.as_str(), produto.preco, produto.estoque],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get(&self, id: ProdutoId) -> RepoResult<Option<Produto>> {
        with_db(&self.db_path, |conn| {
            let mut stmt = conn.prepare(&format!("{PRODUTO_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_produto_row(row)?));
            }
            Ok(None)
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Produto>> {
        with_db(&self.db_path, |conn| {
            // No ORDER BY: row order is store-defined per the read contract.
            let mut stmt = conn.prepare(&format!("{PRODUTO_SELECT_SQL};"))?;
            let mut rows = stmt.query([])?;
            let mut produtos = Vec::new();
            while let Some(row) = rows.next()? {
                produtos.push(parse_produto_row(row)?);
            }
            Ok(produtos)
        })
    }

    fn update(&self, produto: &Produto) -> RepoResult<bool> {
        let Some(id) = produto.id else {
            return Err(RepoError::InvalidData(
                "update requires a produto with a persisted id".to_string(),
            ));
        };

        with_db(&self.db_path, |conn| {
            let changed = conn.execute(
                "UPDATE produtos SET nome = ?1, preco = ?2, estoque = ?3 WHERE id = ?4;",
                params![produto.nome.as_str(), produto.preco, produto.estoque, id],
            )?;
            Ok(changed > 0)
        })
    }

    fn delete(&self, id: ProdutoId) -> RepoResult<bool> {
        with_db(&self.db_path, |conn| {
            let changed = conn.execute("DELETE FROM produtos WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
    }
}

fn parse_produto_row(row: &Row<'_>) -> RepoResult<Produto> {
    let id: ProdutoId = row.get("id")?;
    let nome: String = row.get("nome")?;
    let preco: f64 = row.get("preco")?;
    let estoque: i64 = row.get("estoque")?;

    Produto::with_id(id, nome, preco, estoque)
        .map_err(|err| RepoError::InvalidData(format!("row id {id}: {err}")))
}

fn table_exists(conn: &Connection, table: &'static str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
