//! Nodeview CLI entry point.

use clap::Parser;

use nodeview::cli::{Cli, Commands};
use nodeview::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level.clone(),
        format: if cli.log_json { LogFormat::Json } else { LogFormat::Pretty },
    };
    if let Err(err) = LoggerImpl::init(&log_config) {
        nodeview::cli::handle_error(err, cli.json);
    }

    let baseline = cli.baseline.as_deref();
    let result = match cli.command {
        Commands::Config => nodeview::cli::commands::config::execute(baseline, cli.json),
        Commands::Route(args) => nodeview::cli::commands::route::execute(args, baseline, cli.json),
        Commands::Resolve(args) => {
            nodeview::cli::commands::resolve::execute(args, baseline, cli.json).await
        }
    };

    if let Err(err) = result {
        nodeview::cli::handle_error(err, cli.json);
    }
}
