use thiserror::Error;

/// Errors produced while building or reading values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// A shared node's lock was poisoned by a panicking writer.
    #[error("value node is poisoned and cannot be read")]
    Poisoned,

    #[error("expected a record, found {found}")]
    NotARecord { found: &'static str },

    #[error("expected a list or set, found {found}")]
    NotAList { found: &'static str },

    #[error("expected a map, found {found}")]
    NotAMap { found: &'static str },

    #[error("property '{property}' not found on {owner}")]
    PropertyNotFound { property: String, owner: String },
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
