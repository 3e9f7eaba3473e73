use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The program rejected its flags. The cause is whatever the program reported.
    #[error("{0:#}")]
    Init(anyhow::Error),

    #[error("unknown port '{0}'")]
    UnknownPort(String),

    #[error("port '{0}' already has a subscriber")]
    AlreadySubscribed(&'static str),

    #[error("program panicked: {0}")]
    Panicked(String),
}
