use clap::Parser;
use tracing_subscriber::EnvFilter;

use motif_mark::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("motif_mark=debug,info")
    } else {
        EnvFilter::new("motif_mark=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Adjust(args) => {
            cli::adjust::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Quality(args) => {
            cli::quality::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
