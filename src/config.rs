use crate::error::HostError;
use clap::Parser;
use indoc::indoc;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

const AFTER_HELP: &str = indoc! {"
    The file is read as UTF-8 text and handed to the link application as its
    flags. Every link the application reports is printed to stdout, one per
    line. Logs go to stderr and are filtered with RUST_LOG (default: warn).

    Exit codes:
      64  wrong number of FILE arguments
      66  the file could not be read
      70  the application refused to start
"};

#[derive(Parser, Debug)]
#[command(name = "linkhost", version, about = "Report the links found in a file")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Document handed to the application; exactly one is required
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Pause between two reported links, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub interval_ms: u64,

    /// Exit once every link has been reported
    #[arg(long)]
    pub exit_when_done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub interval: Duration,
    pub exit_when_done: bool,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, HostError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args)?.try_into()
    }
}

impl TryFrom<Cli> for Config {
    type Error = HostError;

    fn try_from(cli: Cli) -> Result<Self, HostError> {
        let found = cli.files.len();
        let path = match <[PathBuf; 1]>::try_from(cli.files) {
            Ok([path]) => path,
            Err(_) => return Err(HostError::Usage { found }),
        };

        Ok(Self {
            path,
            interval: Duration::from_millis(cli.interval_ms),
            exit_when_done: cli.exit_when_done,
        })
    }
}
