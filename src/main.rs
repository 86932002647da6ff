use clap::Parser;
use docmost_cli::cli::dispatcher::Dispatcher;
use docmost_cli::cli::main_types::Cli;
use log::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("docmost v{}", env!("CARGO_PKG_VERSION"));

    let dispatcher = match Dispatcher::new(&cli) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = dispatcher.dispatch(cli.command).await {
        eprintln!("❌ {}", err);
        if let Some(hint) = err.troubleshooting_hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(err.exit_code());
    }
}
