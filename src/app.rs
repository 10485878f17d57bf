use crate::config::Config;
use crate::dictionary::{handle_dictionary_input, DictionaryView};
use crate::models::{AppState, Statistics};
use crate::quiz::QuizEngine;
use crate::session::{handle_quiz_input, QuizSession};
use crate::settings::{handle_settings_input, SettingsView};
use crate::transfer::DictionaryTransfer;
use crate::transfer_worker::{self, TransferRequest, TransferResponse};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rusqlite::Connection;

struct TransferChannels {
    request_tx: Sender<TransferRequest>,
    response_rx: Receiver<TransferResponse>,
}

pub struct App {
    conn: Connection,
    config: Config,
    pub state: AppState,
    pub quiz: QuizSession,
    pub dictionary: DictionaryView,
    pub settings: SettingsView,
    pub statistics: Statistics,
    pub home_error: Option<String>,
    transfer: Option<TransferChannels>,
}

impl App {
    pub fn new(conn: Connection, config: Config) -> Self {
        let quiz = QuizSession::new(config.distractor_count());
        let mut app = Self {
            conn,
            config,
            state: AppState::Home,
            quiz,
            dictionary: DictionaryView::new(),
            settings: SettingsView::new(),
            statistics: Statistics::default(),
            home_error: None,
            transfer: None,
        };
        app.refresh_statistics();
        app
    }

    /// Routes import/export through a background worker instead of running
    /// them on the UI thread.
    pub fn with_transfer_worker(
        mut self,
        request_tx: Sender<TransferRequest>,
        response_rx: Receiver<TransferResponse>,
    ) -> Self {
        self.transfer = Some(TransferChannels {
            request_tx,
            response_rx,
        });
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn refresh_statistics(&mut self) {
        match QuizEngine::new(&self.conn).statistics() {
            Ok(stats) => {
                self.statistics = stats;
                self.home_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load statistics: {}", e);
                self.home_error = Some(format!("Failed to load statistics: {}", e));
            }
        }
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let previous = self.state;
        match self.state {
            AppState::Home => match key.code {
                KeyCode::Char('1') | KeyCode::Enter => self.state = AppState::Quiz,
                KeyCode::Char('2') => self.state = AppState::Dictionary,
                KeyCode::Char('3') => self.state = AppState::Settings,
                KeyCode::Char('q') | KeyCode::Esc => return true,
                _ => {}
            },
            AppState::Quiz => {
                let engine = QuizEngine::new(&self.conn);
                handle_quiz_input(&mut self.quiz, key, &engine, &mut self.state);
            }
            AppState::Dictionary => {
                handle_dictionary_input(&mut self.dictionary, key, &self.conn, &mut self.state);
            }
            AppState::Settings => {
                if let Some(request) = handle_settings_input(&mut self.settings, key, &mut self.state)
                {
                    self.dispatch(request);
                }
            }
        }

        if self.state != previous {
            self.enter(self.state);
        }
        false
    }

    /// Jumps straight to `state`, loading whatever that screen shows.
    pub fn switch_to(&mut self, state: AppState) {
        self.state = state;
        self.enter(state);
    }

    fn enter(&mut self, state: AppState) {
        tracing::debug!(screen = state.title(), "Switching screen");
        match state {
            AppState::Home => self.refresh_statistics(),
            AppState::Quiz => {
                self.quiz = QuizSession::new(self.config.distractor_count());
                self.quiz.load_next(&QuizEngine::new(&self.conn));
            }
            AppState::Dictionary => self.dictionary.reload(&self.conn),
            AppState::Settings => {
                if !self.settings.busy {
                    self.settings.clear_messages();
                }
            }
        }
    }

    fn dispatch(&mut self, request: TransferRequest) {
        let Some(channels) = &self.transfer else {
            let response = transfer_worker::execute(&DictionaryTransfer::new(&self.conn), &request);
            self.apply_transfer_response(response);
            return;
        };

        if let Err(e) = channels.request_tx.send(request) {
            tracing::error!("Transfer worker is gone: {}", e);
            let operation = e.into_inner().operation();
            self.apply_transfer_response(TransferResponse::Failed {
                operation,
                error: "background worker is not running".to_string(),
            });
        }
    }

    /// Drains finished transfers. Returns true when anything changed.
    pub fn poll_transfers(&mut self) -> bool {
        let mut responses = Vec::new();
        if let Some(channels) = &self.transfer {
            loop {
                match channels.response_rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if self.settings.busy {
                            responses.push(TransferResponse::Failed {
                                operation: "Transfer",
                                error: "background worker stopped".to_string(),
                            });
                        }
                        break;
                    }
                }
            }
        }

        let changed = !responses.is_empty();
        for response in responses {
            self.apply_transfer_response(response);
        }
        changed
    }

    fn apply_transfer_response(&mut self, response: TransferResponse) {
        self.settings.apply_response(&response);
        if let TransferResponse::Imported(report) = &response
            && report.added + report.updated > 0
        {
            self.dictionary.reload(&self.conn);
            self.refresh_statistics();
        }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
