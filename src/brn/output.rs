use crate::brn::rename::Batch;
use crate::brn::rename::Operation;
use crate::brn::Verbosity;

const HELP: &str = "\
Usage: brn [--verbose]... [--silent] [--dry-run] [-option argument1 argument2 ...]

Options:
-help                   :: display this help and exit.
-prefix [string]        :: rename the files so that they start with [string].
-suffix [string]        :: rename the files so that they end with [string].
-replace [str1] [str2]  :: rename the files by replacing all instances of [str1] with [str2].
-file [filename]        :: indicate the [filename] to be modified. May be repeated.

Several values after -prefix or -suffix are joined together.
The values @date and @time are replaced by the current date (dd-mm-yyyy)
and time (hh-mm-ss).

Flags, given before any option:
--verbose               :: print more details, repeat for even more.
--silent                :: print nothing but errors.
--dry-run               :: show the renames without touching any file.
-V, --version           :: print the version and exit.";

pub(crate) fn help() {
    println!("{}", HELP);
}

pub(crate) fn dry_run(verbosity: Verbosity) {
    if verbosity.is_silent() {
        return;
    }
    println!("Dry run, no file will be renamed.");
}

pub(crate) fn applying(verbosity: Verbosity, operation: &Operation, src: &str, dst: &str) {
    if verbosity.is_silent() {
        return;
    }
    println!("Applying {}: renaming {} to {}", operation, src, dst);
}

pub(crate) fn summary(verbosity: Verbosity, batch: &Batch) {
    if verbosity < Verbosity::Medium {
        return;
    }
    println!(
        "Applied {} rename(s) to {} file(s).",
        batch.renames(),
        batch.targets().len()
    );
    if Verbosity::High <= verbosity {
        println!("Result:");
        for target in batch.targets() {
            println!("    {} => {}", target.original, target.current);
        }
    }
}
