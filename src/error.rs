use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The terminal session could not be set up, drawn or read from.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
