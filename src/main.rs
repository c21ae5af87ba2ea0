// src/main.rs

use checkrun::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("checkrun error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    let Some(summary) = run(args).await? else {
        return Ok(());
    };

    let failed = summary.failed_outcomes().count();
    tracing::info!(
        checks = summary.outcomes.len(),
        failed,
        skipped_sets = summary.skipped.len(),
        "checks complete"
    );

    if !summary.is_success() {
        anyhow::bail!("no settings set was validated and executed against any check");
    }
    Ok(())
}
