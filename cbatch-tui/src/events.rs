use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppState, RunMode};

pub trait EventHandler {
    fn handle_events(&mut self) -> Result<()>;
    fn handle_key_event(&mut self, key_event: KeyEvent);
}

impl EventHandler for App {
    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event)
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Raw mode swallows SIGINT, so Ctrl-C must work from every view,
        // including a run that never finishes
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.quit();
            return;
        }

        match self.state {
            AppState::JobList => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Up | KeyCode::Char('k') => self.move_up(),
                KeyCode::Down | KeyCode::Char('j') => self.move_down(),
                KeyCode::PageUp => self.page_up(),
                KeyCode::PageDown => self.page_down(),
                KeyCode::Enter | KeyCode::Char('2') => self.request_execution(RunMode::One),
                KeyCode::Char('a') | KeyCode::Char('3') => self.request_execution(RunMode::All),
                KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('4') => self.open_help(),
                KeyCode::Char('d') => self.open_directory_input(),
                KeyCode::Char('r') | KeyCode::Char('1') => self.refresh_jobs(),
                KeyCode::Char('l') => self.open_log_viewer(),
                _ => {}
            },
            AppState::DirectoryInput => match key_event.code {
                KeyCode::Enter => self.confirm_directory_input(),
                KeyCode::Esc => self.cancel_directory_input(),
                KeyCode::Backspace => self.directory_input_pop(),
                KeyCode::Char(c) => self.directory_input_push(c),
                _ => {}
            },
            AppState::Executing => match key_event.code {
                KeyCode::Char('l') => self.open_log_viewer(),
                // Leaving waits for the batch to finish; Ctrl-C quits outright
                KeyCode::Char('q') | KeyCode::Esc if !self.is_executing() => self.go_back(),
                _ => {}
            },
            AppState::OutputLog => {
                if self.log_viewer.search_active {
                    match key_event.code {
                        KeyCode::Enter => self.confirm_search(),
                        KeyCode::Esc => self.cancel_search(),
                        KeyCode::Backspace => self.search_pop_char(),
                        KeyCode::Char(c) => self.search_push_char(c),
                        _ => {}
                    }
                } else {
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.go_back(),
                        KeyCode::Up | KeyCode::Char('k') => self.move_up(),
                        KeyCode::Down | KeyCode::Char('j') => self.move_down(),
                        KeyCode::PageUp => self.page_up(),
                        KeyCode::PageDown => self.page_down(),
                        KeyCode::Char('g') => self.scroll_to_top(),
                        KeyCode::Char('G') => self.scroll_to_bottom(),
                        KeyCode::Char('/') => self.start_search(),
                        KeyCode::Char('n') => self.next_search_match(),
                        KeyCode::Char('f') => self.cycle_job_filter(),
                        _ => {}
                    }
                }
            }
            AppState::Help => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char('1') => {
                    self.go_back()
                }
                _ => {}
            },
        }
    }
}
