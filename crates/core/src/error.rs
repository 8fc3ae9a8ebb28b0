use thiserror::Error;

/// Result type for rankeval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rankeval operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A metric or request was constructed with an out-of-range value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The same document was judged more than once for a single query
    #[error("Duplicate judgment for document [{index}/{id}]")]
    DuplicateJudgment { index: String, id: String },

    /// The same document appeared more than once in a single hit list
    #[error("Duplicate hit for document [{index}/{id}]")]
    DuplicateHit { index: String, id: String },

    /// Parsing errors when reading evaluation input
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a duplicate judgment error
    pub fn duplicate_judgment(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateJudgment {
            index: index.into(),
            id: id.into(),
        }
    }

    /// Creates a duplicate hit error
    pub fn duplicate_hit(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateHit {
            index: index.into(),
            id: id.into(),
        }
    }

    /// Creates a parse error
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
