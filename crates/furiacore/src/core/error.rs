use thiserror::Error;

/// Centralized error types for the application
///
/// Persistence failures are propagated unchanged from the store to the
/// caller; the Telegram layer decides what the user sees.
///
/// # Example
///
/// ```no_run
/// use furiacore::AppError;
///
/// fn handle_error(err: AppError) {
///     if err.is_connection() {
///         eprintln!("storage down: {}", err);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB errors (unreachable server, timeouts, write failures)
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Storage backend unavailable (non-Mongo backends)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Caller broke an operation contract, e.g. a non-positive XP amount
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Process startup failed (logger, runtime wiring)
    #[error("Initialization error: {0}")]
    Init(String),

    /// Configuration could not be extracted from defaults + environment
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Telegram API errors
    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the persistence layer failed, i.e. the user should try again later.
    pub fn is_connection(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Unavailable(_))
    }

    /// Shorthand for [`AppError::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(Box::new(err))
    }
}
