pub mod components;
pub mod execution;
pub mod help;
pub mod job_list;
pub mod layout;
pub mod log_viewer;

use ratatui::Frame;

use crate::app::{App, AppState};

pub fn render(app: &App, frame: &mut Frame) {
    match app.state {
        AppState::JobList => job_list::render(app, frame),
        AppState::DirectoryInput => job_list::render_with_input(app, frame),
        AppState::Executing => execution::render(app, frame),
        AppState::OutputLog => log_viewer::render(app, frame),
        AppState::Help => help::render(app, frame),
    }
}
