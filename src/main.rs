use asset_tools::{Cli, logging, run};
use clap::Parser;

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
