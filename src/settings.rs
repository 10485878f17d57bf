use crate::models::AppState;
use crate::transfer_worker::{TransferRequest, TransferResponse};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

pub const DEFAULT_EXPORT_FILE: &str = "word-quiz-dictionary.json";

#[derive(Debug)]
pub struct SettingsView {
    pub path_buffer: String,
    pub cursor_position: usize,
    pub busy: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsView {
    pub fn new() -> Self {
        let path_buffer = DEFAULT_EXPORT_FILE.to_string();
        Self {
            cursor_position: path_buffer.chars().count(),
            path_buffer,
            busy: false,
            message: None,
            error: None,
        }
    }

    pub fn clear_messages(&mut self) {
        self.message = None;
        self.error = None;
    }

    pub fn apply_response(&mut self, response: &TransferResponse) {
        self.busy = false;
        if response.is_failure() {
            self.message = None;
            self.error = Some(response.message());
        } else {
            self.error = None;
            self.message = Some(response.message());
        }
    }

    fn target_path(&self) -> Option<PathBuf> {
        let trimmed = self.path_buffer.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.path_buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.path_buffer.len(), |(i, _)| i)
    }

    fn request(&mut self, build: fn(PathBuf) -> TransferRequest) -> Option<TransferRequest> {
        if self.busy {
            return None;
        }
        self.clear_messages();
        match self.target_path() {
            Some(path) => {
                self.busy = true;
                Some(build(path))
            }
            None => {
                self.error = Some("Enter a file path first".to_string());
                None
            }
        }
    }
}

/// Edits the path field and turns Ctrl+E / Ctrl+O into export / import
/// requests for the caller to dispatch.
pub fn handle_settings_input(
    view: &mut SettingsView,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Option<TransferRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::Home;
            None
        }
        KeyCode::Char('e') if ctrl => view.request(|path| TransferRequest::Export { path }),
        KeyCode::Char('o') if ctrl => view.request(|path| TransferRequest::Import { path }),
        KeyCode::Char('l') if ctrl => {
            view.clear_messages();
            None
        }
        KeyCode::Left => {
            view.cursor_position = view.cursor_position.saturating_sub(1);
            None
        }
        KeyCode::Right => {
            if view.cursor_position < view.path_buffer.chars().count() {
                view.cursor_position += 1;
            }
            None
        }
        KeyCode::Backspace => {
            if view.cursor_position > 0 {
                let at = view.byte_index(view.cursor_position - 1);
                view.path_buffer.remove(at);
                view.cursor_position -= 1;
            }
            None
        }
        KeyCode::Char(c) if !ctrl => {
            let at = view.byte_index(view.cursor_position);
            view.path_buffer.insert(at, c);
            view.cursor_position += 1;
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{ExportReport, ImportReport};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_export_request_uses_path() {
        let mut view = SettingsView::new();
        let mut state = AppState::Settings;

        let request = handle_settings_input(&mut view, ctrl('e'), &mut state);
        assert_eq!(
            request,
            Some(TransferRequest::Export {
                path: PathBuf::from(DEFAULT_EXPORT_FILE)
            })
        );
        assert!(view.busy);

        // No second request while one is running.
        assert!(handle_settings_input(&mut view, ctrl('o'), &mut state).is_none());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let mut view = SettingsView::new();
        view.path_buffer.clear();
        view.cursor_position = 0;
        let mut state = AppState::Settings;

        assert!(handle_settings_input(&mut view, ctrl('o'), &mut state).is_none());
        assert!(view.error.is_some());
        assert!(!view.busy);
    }

    #[test]
    fn test_editing_path_with_unicode() {
        let mut view = SettingsView::new();
        view.path_buffer.clear();
        view.cursor_position = 0;
        let mut state = AppState::Settings;

        for c in "слова.json".chars() {
            handle_settings_input(&mut view, key(KeyCode::Char(c)), &mut state);
        }
        assert_eq!(view.path_buffer, "слова.json");

        for _ in 0..5 {
            handle_settings_input(&mut view, key(KeyCode::Left), &mut state);
        }
        handle_settings_input(&mut view, key(KeyCode::Backspace), &mut state);
        assert_eq!(view.path_buffer, "слов.json");

        let request = handle_settings_input(&mut view, ctrl('o'), &mut state);
        assert_eq!(
            request,
            Some(TransferRequest::Import {
                path: PathBuf::from("слов.json")
            })
        );
    }

    #[test]
    fn test_apply_response() {
        let mut view = SettingsView::new();
        view.busy = true;

        view.apply_response(&TransferResponse::Exported(ExportReport { exported_count: 3 }));
        assert!(!view.busy);
        assert_eq!(view.message.as_deref(), Some("Exported 3 words"));

        view.apply_response(&TransferResponse::Failed {
            operation: "Import",
            error: "Unsupported schema version: 2".to_string(),
        });
        assert!(view.message.is_none());
        assert_eq!(
            view.error.as_deref(),
            Some("Import failed: Unsupported schema version: 2")
        );

        view.apply_response(&TransferResponse::Imported(ImportReport {
            added: 1,
            updated: 0,
            skipped: 0,
        }));
        assert!(view.error.is_none());
    }

    #[test]
    fn test_escape_goes_home() {
        let mut view = SettingsView::new();
        let mut state = AppState::Settings;
        handle_settings_input(&mut view, key(KeyCode::Esc), &mut state);
        assert_eq!(state, AppState::Home);
    }
}
