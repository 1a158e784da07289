//! Argument scanner.
//!
//! Turns the raw option tokens into an `Invocation` without touching the
//! filesystem. Every option is validated before anything gets renamed.

use crate::brn::rename::Operation;
use crate::brn::token::build_parameter;
use crate::brn::token::format;
use crate::brn::token::is_flag;
use crate::brn::token::Clock;
use crate::brn::RenameError;
use tracing::trace;

pub(crate) const HELP_FLAG: &str = "-help";
pub(crate) const FILE_FLAG: &str = "-file";
pub(crate) const PREFIX_FLAG: &str = "-prefix";
pub(crate) const SUFFIX_FLAG: &str = "-suffix";
pub(crate) const REPLACE_FLAG: &str = "-replace";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Rename(Invocation),
}

/// What to rename and how, in the order given on the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) targets: Vec<String>,
    pub(crate) operations: Vec<Operation>,
}

pub(crate) fn scan(args: &[String], clock: &dyn Clock) -> Result<Command, RenameError> {
    if args.is_empty() {
        return Ok(Command::Help);
    }

    let targets = extract_file_names(args);
    if targets.is_empty() {
        return Err(RenameError::MissingFileName);
    }

    // Once there are files, -help anywhere wins over every other option.
    if args.iter().any(|arg| arg == HELP_FLAG) {
        return Ok(Command::Help);
    }

    let mut operations = Vec::new();
    for (index, arg) in args.iter().enumerate() {
        match arg.as_str() {
            PREFIX_FLAG => {
                let prefix = required_parameter(clock, args, index, "prefix")?;
                operations.push(Operation::Prefix(prefix));
            }
            SUFFIX_FLAG => {
                let suffix = required_parameter(clock, args, index, "suffix")?;
                operations.push(Operation::Suffix(suffix));
            }
            REPLACE_FLAG => {
                let (from, to) = replace_parameters(clock, args, index)?;
                operations.push(Operation::Replace { from, to });
            }
            FILE_FLAG => {}
            option if is_flag(option) => {
                return Err(RenameError::UnknownOption(option.to_string()));
            }
            value => trace!(value, "skipping value"),
        }
    }

    Ok(Command::Rename(Invocation {
        targets,
        operations,
    }))
}

/// Collects the values following every `-file` option, in order.
/// Duplicates are kept.
pub(crate) fn extract_file_names(args: &[String]) -> Vec<String> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| *arg == FILE_FLAG)
        .flat_map(|(index, _)| {
            args[index + 1..]
                .iter()
                .take_while(|arg| !is_flag(arg))
                .cloned()
        })
        .collect()
}

fn required_parameter(
    clock: &dyn Clock,
    args: &[String],
    index: usize,
    name: &str,
) -> Result<String, RenameError> {
    let parameter = build_parameter(clock, args, index);
    if parameter.is_empty() {
        return Err(RenameError::InvalidParameters(format!(
            "{} requires at least one parameter",
            name
        )));
    }
    Ok(parameter)
}

/// The two values right after `-replace`. Both must be present and
/// non-empty. Extra values are ignored.
fn replace_parameters(
    clock: &dyn Clock,
    args: &[String],
    index: usize,
) -> Result<(String, String), RenameError> {
    match (args.get(index + 1), args.get(index + 2)) {
        (Some(from), Some(to)) if !is_flag(from) && !is_flag(to) => {
            let from = format(clock, from);
            let to = format(clock, to);
            if from.is_empty() || to.is_empty() {
                return Err(replace_arity_error());
            }
            Ok((from, to))
        }
        _ => Err(replace_arity_error()),
    }
}

fn replace_arity_error() -> RenameError {
    RenameError::InvalidParameters("replace requires exactly two parameters".to_string())
}
