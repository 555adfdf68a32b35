use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::config::{Theme, UiConfig};
use crate::controller::{FeedController, PageRequest, PageResponse};
use crate::domain::{Article, Category};
use crate::filter::DateRange;
use crate::store::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    DateFrom,
    DateTo,
}

/// Presentation state wrapped around the feed controller.
pub struct TuiApp {
    pub controller: FeedController<SqliteStore>,
    pub theme: Theme,
    pub input_mode: InputMode,
    /// Text in the search box; applied to the controller after the debounce period.
    pub search_input: String,
    pub date_from_input: String,
    pub date_to_input: String,
    /// Text being typed into a date field.
    pub edit_buffer: String,
    pub selected: usize,
    pub list_state: ListState,
    pub status_message: Option<String>,
    pub should_quit: bool,
    search_edited_at: Option<Instant>,
    debounce: Duration,
}

impl TuiApp {
    pub fn new(controller: FeedController<SqliteStore>, ui: &UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            controller,
            theme: ui.theme,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            date_from_input: String::new(),
            date_to_input: String::new(),
            edit_buffer: String::new(),
            selected: 0,
            list_state,
            status_message: None,
            should_quit: false,
            search_edited_at: None,
            debounce: Duration::from_millis(ui.search_debounce_ms),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.controller.view().articles.len()
    }

    pub fn selected_article(&self) -> Option<Article> {
        self.controller
            .view()
            .articles
            .get(self.selected)
            .map(|a| (*a).clone())
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn move_down(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    /// Keep the selection inside the filtered list.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected));
    }

    pub fn apply_response(&mut self, response: PageResponse) {
        if self.controller.apply(response) {
            self.selected = 0;
            self.list_state.select(Some(0));
        }
    }

    pub fn change_category(&mut self, category: Category) -> Option<PageRequest> {
        self.controller.set_category(category)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        match self.controller.next_page() {
            Ok(request) => request,
            Err(e) => {
                self.set_status(e.to_string());
                None
            }
        }
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        match self.controller.prev_page() {
            Ok(request) => request,
            Err(e) => {
                self.set_status(e.to_string());
                None
            }
        }
    }

    pub fn toggle_favorite(&mut self) {
        if let Some(article) = self.selected_article() {
            let saved = self.controller.toggle_favorite(&article);
            let verb = if saved { "Saved" } else { "Removed" };
            self.set_status(format!("{}: {}", verb, article.display_title()));
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.search_edited_at = Some(Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.search_edited_at = Some(Instant::now());
    }

    /// Leave the search box, applying the text immediately.
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.apply_search();
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
        self.apply_search();
    }

    /// Apply the search text once it has been left alone for the debounce period.
    pub fn tick(&mut self, now: Instant) {
        if let Some(edited_at) = self.search_edited_at {
            if now.duration_since(edited_at) >= self.debounce {
                self.apply_search();
            }
        }
    }

    fn apply_search(&mut self) {
        self.search_edited_at = None;
        if self.controller.criteria().search_term != self.search_input {
            self.controller.set_search_term(self.search_input.clone());
            self.clamp_selection();
        }
    }

    pub fn start_date_edit(&mut self, mode: InputMode) {
        self.edit_buffer = match mode {
            InputMode::DateFrom => self.date_from_input.clone(),
            InputMode::DateTo => self.date_to_input.clone(),
            _ => return,
        };
        self.input_mode = mode;
    }

    pub fn cancel_date_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Parse the edited bound together with the other one and apply the range.
    pub fn commit_date_edit(&mut self) {
        let (from, to) = match self.input_mode {
            InputMode::DateFrom => (self.edit_buffer.clone(), self.date_to_input.clone()),
            InputMode::DateTo => (self.date_from_input.clone(), self.edit_buffer.clone()),
            _ => return,
        };

        match DateRange::parse(&from, &to) {
            Ok(range) => {
                self.date_from_input = from.trim().to_string();
                self.date_to_input = to.trim().to_string();
                self.controller.set_date_range(range);
                self.clamp_selection();
            }
            Err(e) => self.set_status(e.to_string()),
        }
        self.cancel_date_edit();
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.date_from_input.clear();
        self.date_to_input.clear();
        self.search_edited_at = None;
        self.controller.clear_filters();
        self.clamp_selection();
        self.set_status("Filters cleared".to_string());
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
