use cbatch_service::RunnerConfig;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = RunnerConfig::load(None)?;
    let jobs_dir = config.jobs_dir.clone();
    cbatch_tui::run(config, &jobs_dir).await
}
