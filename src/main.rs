use clap::Parser;

use betledger::adapter::cli::command::Cli;
use betledger::adapter::cli::output;
use betledger::adapter::cli::run;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(run::output_config(&cli));

    if let Err(e) = run::run(&cli) {
        run::fail(&e);
    }
}
