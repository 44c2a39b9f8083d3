//! Main TUI application loop.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Routing edits and submits to the assessment controller
//! - Polling the controller for finished analyses

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::RandomPredictor;
use crate::application::AssessmentController;
use crate::config::Settings;
use crate::domain::{Field, Gender};
use crate::ports::Predictor;
use crate::Result;

use super::ui::{
    assessment::{render_assessment, FormView},
    overview::render_overview,
    render_disclaimer,
};

/// Current screen in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Assessment,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    controller: AssessmentController,
    form_view: FormView,
    notice_ttl: Duration,
}

impl App {
    /// Create the application with the random placeholder predictor.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let predictor = match settings.rng_seed {
            Some(seed) => RandomPredictor::with_seed(seed),
            None => RandomPredictor::new(),
        };
        Self::with_predictor(Arc::new(predictor), settings)
    }

    /// Create the application around any predictor (Composition Root pattern).
    #[must_use]
    pub fn with_predictor(predictor: Arc<dyn Predictor>, settings: &Settings) -> Self {
        Self {
            screen: Screen::Overview,
            should_quit: false,
            controller: AssessmentController::new(predictor, settings.analysis_delay),
            form_view: FormView::default(),
            notice_ttl: settings.notice_ttl,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::Overview => render_overview(f, chunks[0]),
                    Screen::Assessment => {
                        render_assessment(f, chunks[0], &self.form_view, &self.controller)
                    }
                }

                render_disclaimer(f, chunks[1]);
            })?;

            // Short poll so the loading gauge keeps moving
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Leaving the app unmounts the form; no stale completion afterwards.
        self.controller.cancel();
        Ok(())
    }

    /// Apply finished analyses and expire old notices.
    fn tick(&mut self) {
        self.controller.poll();
        self.controller.expire_notice(self.notice_ttl);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Overview => self.handle_overview_key(key),
            Screen::Assessment => self.handle_assessment_key(key),
        }
    }

    fn handle_overview_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                self.screen = Screen::Assessment;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_assessment_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.controller.cancel();
                self.controller.dismiss_notice();
                self.screen = Screen::Overview;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_view.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_view.next_field(),
            KeyCode::Enter => {
                // Errors surface as a notice; Busy means the button is disabled.
                let _ = self.controller.submit();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.controller.load_sample(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.controller.dismiss_notice(),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.controller.reset();
                self.form_view = FormView::default();
            }
            _ => self.edit_selected(key),
        }
    }

    fn edit_selected(&mut self, key: KeyCode) {
        let field = self.form_view.selected_field();
        let current = self.controller.inputs().get(field);

        let updated = match (field, key) {
            (_, KeyCode::Delete) => Some(String::new()),
            (Field::Gender, KeyCode::Backspace) => Some(String::new()),
            (Field::Gender, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                Some(Gender::cycle(current).to_string())
            }
            (Field::Gender, KeyCode::Char('m') | KeyCode::Char('M')) => {
                Some(Gender::Male.as_str().to_string())
            }
            (Field::Gender, KeyCode::Char('f') | KeyCode::Char('F')) => {
                Some(Gender::Female.as_str().to_string())
            }
            (Field::Gender, _) => None,
            (_, KeyCode::Backspace) => {
                let mut value = current.to_string();
                value.pop();
                Some(value)
            }
            (_, KeyCode::Char(c)) if c.is_ascii_digit() || c == '.' || c == '-' => {
                let mut value = current.to_string();
                value.push(c);
                Some(value)
            }
            _ => None,
        };

        if let Some(value) = updated {
            self.controller.update_field(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NoticeKind;
    use crate::domain::AnalysisState;

    fn test_app() -> App {
        let settings = Settings {
            analysis_delay: Duration::from_millis(20),
            rng_seed: Some(1),
            ..Settings::default()
        };
        App::new(&settings)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for &key in keys {
            app.handle_key(key, KeyModifiers::NONE);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_navigation_and_quit() {
        let mut app = test_app();
        assert_eq!(app.screen, Screen::Overview);

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Assessment);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Overview);

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_edits_numeric_field() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);

        type_text(&mut app, "4x5");
        assert_eq!(app.controller.inputs().get(Field::Age), "45");

        press(&mut app, &[KeyCode::Backspace]);
        assert_eq!(app.controller.inputs().get(Field::Age), "4");

        press(&mut app, &[KeyCode::Delete]);
        assert_eq!(app.controller.inputs().get(Field::Age), "");
    }

    #[test]
    fn test_gender_selector() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Down]);
        assert_eq!(app.form_view.selected_field(), Field::Gender);

        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.controller.inputs().get(Field::Gender), "male");
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.controller.inputs().get(Field::Gender), "female");
        type_text(&mut app, "m");
        assert_eq!(app.controller.inputs().get(Field::Gender), "male");
        type_text(&mut app, "7");
        assert_eq!(app.controller.inputs().get(Field::Gender), "male");
    }

    #[test]
    fn test_empty_submit_raises_notice() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);

        assert_eq!(app.controller.state(), &AnalysisState::Idle);
        let notice = app.controller.notice().expect("Should show notice");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn test_leaving_assessment_cancels_analysis() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "s");
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.controller.state().is_running());

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.controller.state(), &AnalysisState::Idle);

        std::thread::sleep(Duration::from_millis(80));
        app.tick();
        assert_eq!(app.controller.state(), &AnalysisState::Idle);
    }

    #[test]
    fn test_sample_submit_completes() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "s");
        press(&mut app, &[KeyCode::Enter]);

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while app.controller.state().is_running() && std::time::Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(app.controller.state().result().is_some());

        type_text(&mut app, "n");
        assert_eq!(app.controller.state(), &AnalysisState::Idle);
        assert!(app.controller.inputs().get(Field::Age).is_empty());
    }

    #[test]
    fn test_dismiss_keeps_form_and_analysis() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);
        assert!(app.controller.notice().is_some());

        type_text(&mut app, "x");
        assert!(app.controller.notice().is_none());
        assert_eq!(app.screen, Screen::Assessment);

        type_text(&mut app, "s");
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "x");
        assert!(app.controller.state().is_running());
        assert_eq!(app.controller.inputs().get(Field::Age), "45");
    }
}
