//! Main BRN module.
mod output;
mod rename;
mod scan;
mod tests;
mod token;

use crate::brn::rename::Batch;
use crate::brn::scan::Command;
use crate::brn::token::Clock;
use crate::brn::token::LocalClock;
use clap::Parser;
use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing::warn;

/// The command line interface configuration.
///
/// Only the conventional flags are handled by clap. Everything from the first
/// unrecognized token onwards is kept verbatim in `args` and interpreted by
/// the argument scanner, which owns the single-dash rename options.
#[derive(Debug, Parser)]
#[command(name = "brn")]
#[command(author = "Iñaki Garay <igarai@gmail.com>")]
#[command(version = env!("VERSION_STR"))] // set in build.rs
#[command(about = "Batch rename files by prefix, suffix or substring replacement.")]
#[command(long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    #[arg(action = clap::ArgAction::Count)]
    #[arg(help = r#"Sets the verbosity level.
Default is low, one medium, two high, three or more debug."#)]
    #[arg(long = "verbose")]
    verbosity: u8,

    #[arg(help = "Silences all output except errors.")]
    #[arg(long)]
    silent: bool,

    #[arg(help = "Do not effect any changes on the filesystem.")]
    #[arg(long = "dry-run")]
    dry_run: bool,

    #[arg(allow_hyphen_values = true)]
    #[arg(trailing_var_arg = true)]
    #[arg(num_args = 0..)]
    #[arg(value_name = "OPTIONS")]
    #[arg(help = "Rename options, run with -help to list them.")]
    args: Vec<OsString>,
}

// Flags clap handles itself before the rename options start.
const CLI_FLAGS: [&str; 3] = ["--verbose", "--silent", "--dry-run"];
const END_OF_OPTIONS: &str = "--";

impl Cli {
    /// Parses the full argument list, program name included.
    ///
    /// clap takes a `--` in front of the rename options as its own end of
    /// options marker and drops it. It is put back so the scanner rejects it
    /// like any other unknown option.
    pub fn try_from_args<I, T>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut cli = Cli::try_parse_from(&args)?;
        let first_option = args
            .iter()
            .skip(1)
            .find(|arg| !CLI_FLAGS.iter().any(|flag| arg.as_os_str() == *flag));
        if first_option.is_some_and(|arg| arg.as_os_str() == END_OF_OPTIONS) {
            cli.args.insert(0, OsString::from(END_OF_OPTIONS));
        }
        Ok(cli)
    }
}

impl Speaker for Cli {
    fn verbosity(&self) -> Verbosity {
        Verbosity::new(self.silent, self.verbosity)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Low,
    Medium,
    High,
    Debug,
}

impl Verbosity {
    fn new(silent: bool, level: u8) -> Verbosity {
        match (silent, level) {
            (true, _) => Verbosity::Silent,
            (false, 0) => Verbosity::Low,
            (false, 1) => Verbosity::Medium,
            (false, 2) => Verbosity::High,
            (false, _) => Verbosity::Debug,
        }
    }

    fn is_silent(&self) -> bool {
        matches!(self, Verbosity::Silent)
    }

    fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::OFF,
            Verbosity::Low => LevelFilter::WARN,
            Verbosity::Medium => LevelFilter::INFO,
            Verbosity::High => LevelFilter::DEBUG,
            Verbosity::Debug => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub trait Speaker {
    /// Default implementation:
    /// ```ignore
    /// impl Speaker for Cli {
    ///     fn verbosity(self: &Self) -> Verbosity {
    ///         Verbosity::new(self.silent, self.verbosity)
    ///     }
    /// }
    /// ```
    fn verbosity(&self) -> Verbosity;
}

/// Everything that can go wrong during a run.
/// Each variant renders as the single line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    MissingFileName,
    InvalidParameters(String),
    UnknownOption(String),
    Rename(String),
}

impl Error for RenameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for RenameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenameError::MissingFileName => write!(f, "Please specify a file name."),
            RenameError::InvalidParameters(detail) => {
                write!(f, "Invalid parameters: {}.", detail)
            }
            RenameError::UnknownOption(option) => write!(
                f,
                "Invalid option: {} is an invalid option. Run with -help to view available options.",
                option
            ),
            RenameError::Rename(old_name) => write!(f, "Error renaming file: {}", old_name),
        }
    }
}

/// Installs the diagnostics subscriber. Events go to stderr so they never mix
/// with the rename report on stdout.
pub fn init_tracing(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run(cli: &Cli) -> Result<(), RenameError> {
    run_with_clock(cli, &LocalClock)
}

fn run_with_clock(cli: &Cli, clock: &dyn Clock) -> Result<(), RenameError> {
    let verbosity = cli.verbosity();

    let args = unicode_args(&cli.args)?;
    let invocation = match scan::scan(&args, clock)? {
        Command::Help => {
            output::help();
            return Ok(());
        }
        Command::Rename(invocation) => invocation,
    };
    debug!(
        targets = ?invocation.targets,
        operations = ?invocation.operations,
        "scanned arguments"
    );

    if invocation.operations.is_empty() {
        warn!("no rename option given, nothing to do");
    }
    if cli.dry_run {
        output::dry_run(verbosity);
    }

    // Operations run in the order they were given, each one seeing the names
    // produced by the previous one.
    let batch = Batch::new(invocation.targets)
        .with_dry_run(cli.dry_run)
        .with_verbosity(verbosity);
    let batch = invocation
        .operations
        .iter()
        .try_fold(batch, |batch, operation| batch.apply(operation))?;

    output::summary(verbosity, &batch);
    Ok(())
}

/// File names and parameters are handled as text, so anything that is not
/// valid UTF-8 is refused up front.
fn unicode_args(args: &[OsString]) -> Result<Vec<String>, RenameError> {
    args.iter()
        .map(|arg| {
            arg.to_str().map(str::to_string).ok_or_else(|| {
                RenameError::InvalidParameters(format!(
                    "{} is not valid UTF-8",
                    arg.to_string_lossy()
                ))
            })
        })
        .collect()
}
