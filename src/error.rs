use crate::runtime::RuntimeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Please use only one argument")]
    Usage { found: usize },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("application failed to start: {0}")]
    Start(#[from] RuntimeError),

    #[error("application crashed: {0}")]
    Crashed(#[source] RuntimeError),
}

impl HostError {
    pub const USAGE: u8 = 64;
    pub const NO_INPUT: u8 = 66;
    pub const SOFTWARE: u8 = 70;

    /// Process exit status for this error, following sysexits(3).
    pub fn exit_code(&self) -> u8 {
        match self {
            HostError::Usage { .. } => Self::USAGE,
            HostError::Cli(err) => u8::try_from(err.exit_code()).unwrap_or(Self::USAGE),
            HostError::Read { .. } => Self::NO_INPUT,
            HostError::Start(_) | HostError::Crashed(_) => Self::SOFTWARE,
        }
    }
}
