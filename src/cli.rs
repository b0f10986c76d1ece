use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: tinyunzip <ZIP_FILE> <ENTRY> <OUTPUT>";

#[derive(Parser, Debug)]
#[command(name = "tinyunzip")]
#[command(version)]
#[command(about = "Extract a single entry from a ZIP archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  tinyunzip assets.zip textures/wall.png wall.png   extract one entry\n  \
  tinyunzip -t data.zip report.csv out.csv          extract and verify CRC-32")]
pub struct Cli {
    /// ZIP file path
    #[arg(value_name = "ZIP_FILE")]
    pub zip_file: PathBuf,

    /// Entry to extract, exactly as named in the archive
    #[arg(value_name = "ENTRY")]
    pub entry: String,

    /// Where to write the extracted bytes
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Check size and CRC-32 of the extracted data
    #[arg(short = 't', long = "test")]
    pub verify: bool,

    /// Quiet mode, no progress lines
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true, value_name = "IGNORED")]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parse `std::env::args`. Returns `None` when positional arguments
    /// are missing, in which case the caller prints [`USAGE`] and exits
    /// normally. Every other parse failure, `--help` and `--version` are
    /// reported by clap, which exits the process.
    pub fn parse_or_usage() -> Option<Self> {
        Self::from_args_or_usage(std::env::args_os())
    }

    pub fn from_args_or_usage<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_from_args_or_usage(args).unwrap_or_else(|err| err.exit())
    }

    /// Like [`from_args_or_usage`](Self::from_args_or_usage), but hands
    /// clap's error back instead of exiting.
    pub fn try_from_args_or_usage<I, T>(args: I) -> Result<Option<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => Ok(None),
            Err(err) => Err(err),
        }
    }
}
