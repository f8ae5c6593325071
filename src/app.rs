//! Application state management for the workout feed viewer
//!
//! This module contains the main application state, handling keyboard input,
//! load results, and state transitions between views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::cli::StartupConfig;
use crate::feed::Item;
use crate::loader::{FeedError, LoadSource, Loaded};
use crate::sort::SortKey;
use crate::view::visible_items;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the loader
    Loading,
    /// Collection available (possibly empty)
    Ready,
    /// The load failed; holds the message shown to the user
    Error(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Loaded collection; never reordered or modified by the view
    pub items: Vec<Item>,
    /// Field the list is ordered by
    pub sort_key: SortKey,
    /// Index of the highlighted row in the visible list
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Where the collection came from
    pub source: Option<LoadSource>,
    /// When the collection became available
    pub loaded_at: Option<DateTime<Local>>,
    /// Flag indicating the user asked to retry a failed load
    pub retry_requested: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            items: Vec::new(),
            sort_key: SortKey::default(),
            selected_index: 0,
            should_quit: false,
            show_help: false,
            source: None,
            loaded_at: None,
            retry_requested: false,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        let mut app = Self::new();
        app.sort_key = config.initial_sort;
        app
    }

    /// Applies the outcome of a load.
    ///
    /// Only a `Loading` app accepts a result; anything arriving later is ignored.
    pub fn apply_load(&mut self, result: Result<Loaded, FeedError>) {
        if self.state != AppState::Loading {
            warn!(state = ?self.state, "ignoring load result outside of Loading state");
            return;
        }

        match result {
            Ok(loaded) => {
                info!(
                    count = loaded.items.len(),
                    source = loaded.source.label(),
                    "feed ready"
                );
                self.items = loaded.items;
                self.source = Some(loaded.source);
                self.loaded_at = Some(Local::now());
                self.selected_index = 0;
                self.state = AppState::Ready;
            }
            Err(error) => {
                warn!(%error, "feed load failed");
                self.state = AppState::Error(error.to_string());
            }
        }
    }

    /// Moves a failed app back to `Loading` so the load can be re-run.
    ///
    /// Returns `true` if the transition happened.
    pub fn begin_retry(&mut self) -> bool {
        self.retry_requested = false;
        if matches!(self.state, AppState::Error(_)) {
            info!("retrying feed load");
            self.state = AppState::Loading;
            true
        } else {
            false
        }
    }

    /// Visible items in display order
    pub fn visible(&self) -> Vec<&Item> {
        visible_items(&self.items, self.sort_key)
    }

    /// Number of visible items
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_displayable()).count()
    }

    /// Returns the currently highlighted item, if any
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible().get(self.selected_index).copied()
    }

    /// Changes the sort key and moves the highlight back to the top
    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort_key != key {
            info!(sort = key.label(), "sort key changed");
            self.sort_key = key;
            self.selected_index = 0;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` (any state, help included) or `Esc` (outside help): Quit the application
    /// - `Up`/`k`, `Down`/`j`: Move selection, wrapping around
    /// - `g`/`G`: Jump to first/last item
    /// - `s`/`Tab`, `S`/`BackTab`: Next/previous sort key
    /// - `1`-`3`: Sort by Created, Kudos, Level
    /// - `r` (in Error): Retry the load
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') => {
                    self.show_help = false;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            AppState::Error(_) => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.retry_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Ready => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Char('g') => {
                    self.selected_index = 0;
                }
                KeyCode::Char('G') => {
                    self.selected_index = self.visible_count().saturating_sub(1);
                }
                KeyCode::Char('s') | KeyCode::Tab => {
                    self.set_sort_key(self.sort_key.next());
                }
                KeyCode::Char('S') | KeyCode::BackTab => {
                    self.set_sort_key(self.sort_key.previous());
                }
                KeyCode::Char('1') => {
                    self.set_sort_key(SortKey::Created);
                }
                KeyCode::Char('2') => {
                    self.set_sort_key(SortKey::KudosCount);
                }
                KeyCode::Char('3') => {
                    self.set_sort_key(SortKey::Level);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }
}
