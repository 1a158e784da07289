//! Rename engine.
//!
//! A batch holds the target files in the order they were given. Applying an
//! operation renames every target in that order and returns the batch with the
//! new names, so that the next operation starts from them. The first failure
//! stops the batch; renames already done are left in place.

use crate::brn::output;
use crate::brn::RenameError;
use crate::brn::Verbosity;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing::trace;

/// The transformation applied to every target name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    Prefix(String),
    Suffix(String),
    Replace { from: String, to: String },
}

impl Operation {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Operation::Prefix(_) => "prefix",
            Operation::Suffix(_) => "suffix",
            Operation::Replace { .. } => "replace",
        }
    }

    pub(crate) fn apply(&self, filename: &str) -> String {
        match self {
            Operation::Prefix(prefix) => apply_prefix(filename, prefix),
            Operation::Suffix(suffix) => apply_suffix(filename, suffix),
            Operation::Replace { from, to } => apply_replace(filename, from, to),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub(crate) fn apply_prefix(filename: &str, prefix: &str) -> String {
    format!("{prefix}{filename}")
}

pub(crate) fn apply_suffix(filename: &str, suffix: &str) -> String {
    format!("{filename}{suffix}")
}

/// Replaces every occurrence of `from`, not just the first one.
pub(crate) fn apply_replace(filename: &str, from: &str, to: &str) -> String {
    filename.replace(from, to)
}

/// A file to rename, as it was named on the command line and as it is named now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    pub(crate) original: String,
    pub(crate) current: String,
}

impl Target {
    fn new(name: String) -> Self {
        Target {
            original: name.clone(),
            current: name,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Batch {
    targets: Vec<Target>,
    dry_run: bool,
    verbosity: Verbosity,
    renames: usize,
}

impl Batch {
    pub(crate) fn new(files: Vec<String>) -> Self {
        Batch {
            targets: files.into_iter().map(Target::new).collect(),
            dry_run: false,
            verbosity: Verbosity::Low,
            renames: 0,
        }
    }

    pub(crate) fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub(crate) fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub(crate) fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Number of renames performed (or reported, in a dry run) so far.
    pub(crate) fn renames(&self) -> usize {
        self.renames
    }

    /// Applies the operation to every target, in order.
    pub(crate) fn apply(self, operation: &Operation) -> Result<Batch, RenameError> {
        let Batch {
            targets,
            dry_run,
            verbosity,
            renames,
        } = self;

        // `collect` into a `Result` stops at the first error, leaving the
        // remaining targets untouched.
        let targets = targets
            .into_iter()
            .map(|target| -> Result<Target, RenameError> {
                let new_name = operation.apply(&target.current);
                output::applying(verbosity, operation, &target.current, &new_name);
                if dry_run {
                    trace!(src = %target.current, dst = %new_name, "dry run, skipping");
                } else {
                    rename_file(&target.current, &new_name)?;
                }
                Ok(Target {
                    current: new_name,
                    ..target
                })
            })
            .collect::<Result<Vec<Target>, RenameError>>()?;

        let renames = renames + targets.len();
        Ok(Batch {
            targets,
            dry_run,
            verbosity,
            renames,
        })
    }
}

/// Renames the file `old_name` to `new_name`.
///
/// The source must exist and the destination must not, unless both are the
/// same name, in which case nothing is done. A destination that is the source
/// file itself, such as a case-only rename on a case-insensitive filesystem,
/// is not in the way. Whatever the underlying cause, a failure is reported as
/// the same error carrying the old name.
pub(crate) fn rename_file(old_name: &str, new_name: &str) -> Result<(), RenameError> {
    let src = Path::new(old_name);
    let dst = Path::new(new_name);

    if let Err(reason) = fs::symlink_metadata(src) {
        debug!(src = %old_name, %reason, "source is not accessible");
        return Err(RenameError::Rename(old_name.to_string()));
    }
    if old_name == new_name {
        trace!(src = %old_name, "name unchanged");
        return Ok(());
    }
    if fs::symlink_metadata(dst).is_ok() && !same_file(src, dst) {
        debug!(src = %old_name, dst = %new_name, "destination already exists");
        return Err(RenameError::Rename(old_name.to_string()));
    }

    fs::rename(src, dst).map_err(|reason| {
        debug!(src = %old_name, dst = %new_name, %reason, "rename failed");
        RenameError::Rename(old_name.to_string())
    })
}

/// Returns true if both paths lead to the same file.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
