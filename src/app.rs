use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::config::AppConfig;
use crate::shuffle::Rng;
use crate::store::Roster;
use crate::theme::{self, StandupTheme};

/// Seconds before a status message clears itself
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Input,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Confirm,
    Help,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Roster state
    pub roster: Roster,
    pub selected: usize,

    // Config
    pub config: AppConfig,

    // Input buffer for the add-name field
    pub input_buffer: String,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    rng: Rng,
}

impl App {
    pub fn new(config: AppConfig, roster: Roster) -> Self {
        Self {
            section: Section::Input,
            popup: Popup::None,

            roster,
            selected: 0,

            config,

            input_buffer: String::new(),

            status_message: None,
            status_message_time: None,

            rng: Rng::from_entropy(),
        }
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn current_theme(&self) -> &'static StandupTheme {
        theme::get(self.roster.theme_index())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        match self.section {
            Section::Input => self.handle_input_key(key),
            Section::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
                self.section = Section::List;
            }
            KeyCode::Enter => self.submit_input()?,
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Esc => self.input_buffer.clear(),
            KeyCode::Char(c) => {
                // Preventive: refuse input once the roster is at capacity.
                // The store enforces the cap on its own regardless.
                if self.roster.is_full() {
                    self.set_status(format!("Roster is full ({} names max)", self.config.max_names));
                } else {
                    self.input_buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = Section::Input;
            }

            // Vertical navigation with wraparound
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            // Shuffle the presentation order
            KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => self.shuffle()?,

            // Delete selected entry
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                self.delete_selected()?;
            }

            // Clear everything, behind a confirmation
            KeyCode::Char('c') => self.request_clear(),

            // Help (? or h)
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc
                        | KeyCode::Char('?')
                        | KeyCode::Char('h')
                        | KeyCode::Enter
                        | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::Confirm => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        self.confirm_clear()?;
                        self.popup = Popup::None;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        self.popup = Popup::None;
                    }
                    _ => {}
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn move_down(&mut self) {
        if !self.roster.is_empty() {
            self.selected = (self.selected + 1) % self.roster.len();
        }
    }

    fn move_up(&mut self) {
        if !self.roster.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.roster.len() - 1);
        }
    }

    fn submit_input(&mut self) -> Result<()> {
        let name = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        if name.is_empty() {
            return Ok(());
        }

        if self.roster.is_full() {
            self.set_status(format!("Roster is full ({} names max)", self.config.max_names));
            return Ok(());
        }

        self.roster.add(&name)?;
        self.set_status(format!("Added {}", name));
        Ok(())
    }

    fn shuffle(&mut self) -> Result<()> {
        self.roster.shuffle(&mut self.rng, &self.config.shuffle)?;
        let theme = self.current_theme();
        self.set_status(format!("{} Shuffled into {} order", theme.emoji, theme.label));
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        if self.roster.is_empty() {
            return Ok(());
        }

        let name = self.roster.names()[self.selected].clone();
        self.roster.remove_at(self.selected)?;
        self.set_status(format!("Removed {}", name));

        // Adjust selection if needed
        if self.selected >= self.roster.len() && !self.roster.is_empty() {
            self.selected = self.roster.len() - 1;
        }
        Ok(())
    }

    fn request_clear(&mut self) {
        if self.roster.is_empty() {
            self.set_status("Nothing to clear");
            return;
        }
        self.set_status(format!(
            "Clear all {} team members? This cannot be undone. (y/n)",
            self.roster.len()
        ));
        self.popup = Popup::Confirm;
    }

    fn confirm_clear(&mut self) -> Result<()> {
        self.roster.clear()?;
        self.selected = 0;
        self.set_status("Team cleared");
        Ok(())
    }

    pub fn tick(&mut self) {
        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use crossterm::event::KeyModifiers;

    fn test_app(max_names: usize) -> App {
        let roster = Roster::load(Box::new(MemoryStorage::default()), max_names);
        let config = AppConfig {
            max_names,
            ..AppConfig::default()
        };
        App::new(config, roster)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_name(app: &mut App, name: &str) {
        for c in name.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_typing_and_enter_adds_a_name() {
        let mut app = test_app(100);
        type_name(&mut app, "Alice");

        assert_eq!(app.roster.names(), ["Alice"]);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_whitespace_submission_is_ignored() {
        let mut app = test_app(100);
        type_name(&mut app, "   ");

        assert!(app.roster.is_empty());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_input_refused_at_capacity() {
        let mut app = test_app(2);
        type_name(&mut app, "Alice");
        type_name(&mut app, "Bob");
        type_name(&mut app, "Carol");

        assert_eq!(app.roster.len(), 2);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_tab_cycles_sections() {
        let mut app = test_app(100);
        assert_eq!(app.section, Section::Input);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::List);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::Input);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut app = test_app(100);
        for name in ["Alice", "Bob", "Carol"] {
            type_name(&mut app, name);
        }
        press(&mut app, KeyCode::Tab);

        // Move to the last entry and delete it
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.roster.names(), ["Alice", "Bob"]);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut app = test_app(100);
        type_name(&mut app, "Alice");
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.popup, Popup::Confirm);
        assert_eq!(app.roster.len(), 1);

        // Declining keeps the roster
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.roster.len(), 1);

        // Confirming clears it
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.roster.is_empty());
        assert_eq!(app.roster.theme_index(), 0);
    }

    #[test]
    fn test_shuffle_advances_the_theme() {
        let mut app = test_app(100);
        for name in ["Alice", "Bob", "Carol"] {
            type_name(&mut app, name);
        }
        press(&mut app, KeyCode::Tab);

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('s'));
        }
        assert_eq!(app.roster.theme_index(), 3 % theme::count());
        assert_eq!(app.roster.len(), 3);
    }

    #[test]
    fn test_help_popup_opens_and_closes() {
        let mut app = test_app(100);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.popup, Popup::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }
}
