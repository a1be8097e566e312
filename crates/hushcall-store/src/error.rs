use hushcall_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database file: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("no home directory to hold the database")]
    MissingHomeDir,
    #[error("unusable data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("malformed {table} row: {value:?}")]
    CorruptRow { table: &'static str, value: String },
    #[error("database schema version {found} is newer than this build ({supported})")]
    SchemaTooNew { found: i64, supported: i64 },
    #[error("schema version table must hold one row, found {0}")]
    SchemaTable(usize),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse grouping used by callers that map failures to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    InvalidInput,
    Environment,
    Database,
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound { .. } => StoreErrorKind::NotFound,
            StoreError::Core(_) => StoreErrorKind::InvalidInput,
            StoreError::MissingHomeDir | StoreError::InvalidDataPath(_) | StoreError::Io(_) => {
                StoreErrorKind::Environment
            }
            StoreError::Sql(_)
            | StoreError::CorruptRow { .. }
            | StoreError::SchemaTooNew { .. }
            | StoreError::SchemaTable(_) => StoreErrorKind::Database,
        }
    }
}
