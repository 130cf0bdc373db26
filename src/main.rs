use anyhow::Result;
use tracing_subscriber::EnvFilter;

use chronolog::config::Config;
use chronolog::logging::{Ledger, Severity};

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with console echo
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chronolog=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let settings = config.prepare()?;
    tracing::info!("Logging to: {}", settings.file_path.display());

    let mut ledger = Ledger::new(settings);
    run(&mut ledger);

    let path = ledger.finalize();
    tracing::info!("Log saved to {}", path.display());
    Ok(())
}

fn run(ledger: &mut Ledger) {
    let warning = ledger.entry(Severity::WARNING, "Example warning message 1");
    ledger.append(warning);

    let debug = ledger.entry(Severity::DEBUG, "Example debug message 2");
    ledger.append(debug);
}
