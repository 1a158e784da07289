mod brn;

use crate::brn::Cli;
use crate::brn::Speaker;
use std::env;
use std::process;

fn main() {
    let cli = Cli::try_from_args(env::args_os()).unwrap_or_else(|error| error.exit());
    crate::brn::init_tracing(cli.verbosity());

    if let Err(reason) = crate::brn::run(&cli) {
        eprintln!("{}", reason);
        process::exit(1)
    }
}
