use clap::Parser;
use injury_feed::app::App;
use injury_feed::cli::Args;
use injury_feed::config::Config;
use injury_feed::logging::setup_logging;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging first so startup logs are never silently dropped
    let mut config = Config::load(args.config.as_deref()).expect("Failed to load config");
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    setup_logging(&config, args.tracing);

    let leagues = args.leagues();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        leagues = ?leagues,
        "starting injury-feed"
    );

    let app = App::new(config).expect("Failed to initialize application");
    app.run(&leagues).await
}
