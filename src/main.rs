use clap::Parser;
use phasionary::cli::{self, Cli};
use phasionary::logging;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("warning: {}", e);
    }

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
