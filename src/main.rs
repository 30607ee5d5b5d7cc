use clap::Parser;
use env_logger::Env;

fn main() {
    let cli = raillabel::Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = raillabel::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
