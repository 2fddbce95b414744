use clap::Parser;
use classify::cli::{self, Args};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries only the answer line
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut stdout = std::io::stdout();
    match cli::run(&args, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = err.exit_code(), "classification failed");
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}
