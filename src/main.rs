use clap::Parser;
use sleek::cli::commands::Cli;
use sleek::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // No subcommand → TUI; dispatch decides
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
