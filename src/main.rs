use std::sync::Arc;

use clap::Parser;
use filterdiff::{
    cli::{Args, SettingsLoader},
    error::FilterError,
    net::{HttpDohResolver, Validator},
    pipeline,
};

#[tokio::main]
async fn main() -> Result<(), FilterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = SettingsLoader::load(&args)?;

    let summary = if settings.variant.validates() {
        let resolver = HttpDohResolver::new(settings.resolver.endpoint.clone())?;
        let validator = Validator::new(
            Arc::new(resolver),
            settings.resolver.timeout,
            settings.resolver.concurrency,
        );
        pipeline::run(&settings, Some(&validator)).await?
    } else {
        pipeline::run::<HttpDohResolver>(&settings, None).await?
    };

    log::info!(
        "Done: {}/{} target(s) processed, {} new entries, {} written to the combined list",
        summary.processed_targets,
        settings.targets.len(),
        summary.new_entries,
        summary.combined_entries
    );
    Ok(())
}
