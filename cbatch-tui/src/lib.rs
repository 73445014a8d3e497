mod app;
mod events;
mod ui;

use app::App;
use cbatch_service::RunnerConfig;
use color_eyre::Result;

use std::path::Path;

/// Run the terminal UI on `jobs_dir` until the user quits
pub async fn run(config: RunnerConfig, jobs_dir: &Path) -> Result<()> {
    let terminal = ratatui::init();
    let result = App::new(config, jobs_dir).run(terminal).await;
    ratatui::restore();
    result
}
