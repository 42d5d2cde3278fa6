//! Produto domain model and validation contract.
//!
//! # Responsibility
//! - Define the catalog record shared by the repository and the shell.
//! - Aggregate every violated field rule into one validation error.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never mutated afterwards.
//! - `nome` is non-blank after trimming and at most `NOME_MAX_CHARS` long.
//! - `preco` is strictly positive; `estoque` is never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProdutoId = i64;

/// Maximum accepted length for `nome`, in characters.
pub const NOME_MAX_CHARS: usize = 100;

/// One violated field rule.
///
/// Variants carry the offending value so callers can report precisely what
/// was rejected without re-deriving it from the input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldViolation {
    /// `id` was present but not strictly positive.
    NonPositiveId { id: ProdutoId },
    /// `nome` was empty or whitespace-only.
    BlankNome,
    /// `nome` exceeded `NOME_MAX_CHARS` characters.
    NomeTooLong { chars: usize },
    /// `preco` was zero or negative.
    NonPositivePreco { preco: f64 },
    /// `estoque` was negative.
    NegativeEstoque { estoque: i64 },
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId { .. } => {
                write!(f, "O id do produto não pode ser negativo ou zero.")
            }
            Self::BlankNome => write!(f, "O nome do produto não pode ser vazio."),
            Self::NomeTooLong { .. } => {
                write!(f, "O nome do produto não pode exceder 100 caracteres.")
            }
            Self::NonPositivePreco { .. } => write!(f, "O preço deve ser maior que zero."),
            Self::NegativeEstoque { .. } => write!(f, "O estoque não pode ser negativo."),
        }
    }
}

/// Validation failure carrying every violated rule, not just the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProdutoValidationError {
    /// Violations in field declaration order: id, nome, preco, estoque.
    pub violations: Vec<FieldViolation>,
}

impl Display for ProdutoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ProdutoValidationError {}

/// Canonical catalog record.
///
/// Constructed transiently for each operation; there is no long-lived
/// in-memory registry of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    /// Store-assigned identifier. `None` until the record is first persisted.
    pub id: Option<ProdutoId>,
    /// Display name, trimmed-non-blank, at most 100 characters.
    pub nome: String,
    /// Unit price, strictly greater than zero.
    pub preco: f64,
    /// Units in stock, never negative.
    pub estoque: i64,
}

impl Produto {
    /// Creates a brand-new record that has not been persisted yet.
    ///
    /// # Errors
    /// - Returns `ProdutoValidationError` listing every violated field rule.
    pub fn new(
        nome: impl Into<String>,
        preco: f64,
        estoque: i64,
    ) -> Result<Self, ProdutoValidationError> {
        Self::from_parts(None, nome.into(), preco, estoque)
    }

    /// Creates a record carrying an existing store identifier.
    ///
    /// Used when reconstructing from a stored row and when applying an
    /// update, where the identifier is carried over unchanged.
    ///
    /// # Errors
    /// - Returns `ProdutoValidationError` listing every violated field rule,
    ///   including a non-positive `id`.
    pub fn with_id(
        id: ProdutoId,
        nome: impl Into<String>,
        preco: f64,
        estoque: i64,
    ) -> Result<Self, ProdutoValidationError> {
        Self::from_parts(Some(id), nome.into(), preco, estoque)
    }

    /// Shared constructor behind `new` and `with_id`.
    pub fn from_parts(
        id: Option<ProdutoId>,
        nome: String,
        preco: f64,
        estoque: i64,
    ) -> Result<Self, ProdutoValidationError> {
        let produto = Self {
            id,
            nome,
            preco,
            estoque,
        };
        produto.validate()?;
        Ok(produto)
    }

    /// Checks all field invariants and aggregates every violation.
    ///
    /// # Contract
    /// - No side effects.
    /// - Violations are reported in field declaration order.
    pub fn validate(&self) -> Result<(), ProdutoValidationError> {
        let mut violations = Vec::new();

        if let Some(id) = self.id {
            if id <= 0 {
                violations.push(FieldViolation::NonPositiveId { id });
            }
        }

        if self.nome.trim().is_empty() {
            violations.push(FieldViolation::BlankNome);
        } else {
            // Length is measured on the value as given; the shell trims
            // free-text input before construction.
            let chars = self.nome.chars().count();
            if chars > NOME_MAX_CHARS {
                violations.push(FieldViolation::NomeTooLong { chars });
            }
        }

        // Written as a negated comparison so NaN is rejected as well.
        if !(self.preco > 0.0) {
            violations.push(FieldViolation::NonPositivePreco { preco: self.preco });
        }

        if self.estoque < 0 {
            violations.push(FieldViolation::NegativeEstoque {
                estoque: self.estoque,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ProdutoValidationError { violations })
        }
    }
}
