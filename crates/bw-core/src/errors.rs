/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the handlers
/// can treat every fault the same way (log it, answer the user, keep going).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
