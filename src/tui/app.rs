use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::filter::{
    DeferredQuery, DomainEngine, FieldKind, FilterCache, FilterConfig, FilterField,
};
use crate::output::Summary;
use crate::sanitize::CandidateList;
use crate::scoring::DomainRecord;
use crate::source::Source;

const FLASH_SECS: u64 = 3;
const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Help,
}

pub struct App {
    pub engine: DomainEngine,
    pub source: Source,
    pub candidates: CandidateList,
    /// Filter values as shown in the panel; `query` is the typed text
    pub filters: FilterConfig,
    /// Typed versus applied search text
    pub query: DeferredQuery,
    pub cache: FilterCache,
    pub records: Arc<[DomainRecord]>,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub focused: usize,
    pub edit_buffer: String,
    /// Field value when editing started, restored on cancel
    edit_original: String,
    pub flash_message: Option<(String, Instant)>,
    pub export_path: PathBuf,
    pub load_error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        engine: DomainEngine,
        source: Source,
        candidates: CandidateList,
        filters: FilterConfig,
        debounce: Duration,
        export_path: PathBuf,
    ) -> Self {
        let query = DeferredQuery::new(&filters.query, debounce);
        let mut app = Self {
            engine,
            source,
            candidates,
            filters,
            query,
            cache: FilterCache::new(),
            records: Arc::from(Vec::new()),
            table_state: ratatui::widgets::TableState::default(),
            input_mode: InputMode::Normal,
            focused: 0,
            edit_buffer: String::new(),
            edit_original: String::new(),
            flash_message: None,
            export_path,
            load_error: None,
            should_quit: false,
        };
        app.recompute();
        app
    }

    /// The configuration the table reflects: panel values with the
    /// deferred query applied.
    pub fn effective_config(&self) -> FilterConfig {
        self.filters.with_query(self.query.applied())
    }

    pub fn recompute(&mut self) {
        let config = self.effective_config();
        self.records = self
            .cache
            .get_or_compute(&self.engine, &self.candidates, &config);

        let selected = match self.table_state.selected() {
            _ if self.records.is_empty() => None,
            Some(i) => Some(i.min(self.records.len() - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.candidates.len(), &self.records)
    }

    pub fn focused_field(&self) -> FilterField {
        FilterField::ALL[self.focused % FilterField::ALL.len()]
    }

    // Table navigation

    pub fn next_row(&mut self) {
        self.move_selection(1);
    }

    pub fn previous_row(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(PAGE_ROWS as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(PAGE_ROWS as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.records.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if delta == 1 && i >= len - 1 => 0,
            Some(0) if delta == -1 => len - 1,
            Some(i) => i.saturating_add_signed(delta).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_record(&self) -> Option<&DomainRecord> {
        self.table_state.selected().and_then(|i| self.records.get(i))
    }

    // Filter panel

    pub fn focus_next_field(&mut self) {
        self.focused = (self.focused + 1) % FilterField::ALL.len();
    }

    pub fn focus_previous_field(&mut self) {
        self.focused = (self.focused + FilterField::ALL.len() - 1) % FilterField::ALL.len();
    }

    /// Enter on a panel field: flags toggle, choices cycle, text and numbers
    /// open the editor.
    pub fn activate_field(&mut self) {
        let field = self.focused_field();
        match field.kind() {
            FieldKind::Flag => {
                let current = self.filters.value_of(field) == "true";
                self.apply_field(field, &(!current).to_string());
            }
            FieldKind::Choice => {
                let next = match field {
                    FilterField::Mode => self.filters.mode.next().to_string(),
                    _ => self.filters.sort_by.next().to_string(),
                };
                self.apply_field(field, &next);
            }
            FieldKind::Text | FieldKind::Number => self.start_editing(),
        }
    }

    pub fn start_editing(&mut self) {
        self.edit_buffer = self.filters.value_of(self.focused_field());
        self.edit_original = self.edit_buffer.clone();
        self.input_mode = InputMode::Editing;
    }

    /// Jump straight to the search box
    pub fn start_search(&mut self) {
        self.focused = 0;
        self.start_editing();
    }

    pub fn edit_push(&mut self, c: char, now: Instant) {
        self.edit_buffer.push(c);
        self.sync_live_query(now);
    }

    pub fn edit_pop(&mut self, now: Instant) {
        self.edit_buffer.pop();
        self.sync_live_query(now);
    }

    /// The search box updates on every keystroke; the table follows once
    /// typing pauses.
    fn sync_live_query(&mut self, now: Instant) {
        if self.focused_field() == FilterField::Query {
            self.filters.query = self.edit_buffer.clone();
            self.query.set(&self.edit_buffer, now);
        }
    }

    pub fn confirm_edit(&mut self) {
        let field = self.focused_field();
        let value = std::mem::take(&mut self.edit_buffer);
        self.edit_original.clear();
        self.input_mode = InputMode::Normal;

        if field == FilterField::Query {
            self.filters.query = value.clone();
            self.query.set(&value, Instant::now());
            if self.query.flush() {
                self.recompute();
            }
        } else {
            self.apply_field(field, &value);
        }
    }

    /// Leave the editor without applying. The search box may already have
    /// pushed keystrokes into the query, so its previous value is restored.
    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
        let original = std::mem::take(&mut self.edit_original);

        if self.focused_field() == FilterField::Query {
            self.query.set(&original, Instant::now());
            self.filters.query = original;
            if self.query.flush() {
                self.recompute();
            }
        }
    }

    fn apply_field(&mut self, field: FilterField, value: &str) {
        match self.filters.update(field, value) {
            Ok(()) => self.recompute(),
            Err(e) => self.show_flash(format!("Error: {}", e)),
        }
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset_filters();
        self.query.set("", Instant::now());
        self.query.flush();
        self.recompute();
        self.show_flash("Filters cleared".to_string());
    }

    // Periodic work

    /// Called on every tick: expire the flash and apply a settled query.
    /// Returns true when the screen needs redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.update_flash();
        let applied = self.query.poll(now);
        if applied {
            self.recompute();
        }
        expired || applied
    }

    pub fn update_flash(&mut self) -> bool {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
                return true;
            }
        }
        false
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    // Source and export

    /// Re-read the source. The candidate list is replaced wholesale; on
    /// failure the previous results are cleared.
    pub fn reload(&mut self) {
        if !self.source.can_reload() {
            self.show_flash("Error: stdin cannot be reloaded".to_string());
            return;
        }
        match self.source.read() {
            Ok(text) => {
                self.candidates = self.engine.sanitize(&text);
                self.load_error = None;
                self.recompute();
                self.show_flash(format!("Reloaded {} domains", self.candidates.len()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed");
                self.candidates = CandidateList::default();
                self.recompute();
                self.show_flash(format!("Failed: {}", e));
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn export(&mut self) {
        match crate::output::write_csv(&self.export_path, &self.records) {
            Ok(()) => self.show_flash(format!(
                "Exported {} domains to {}",
                self.records.len(),
                self.export_path.display()
            )),
            Err(e) => self.show_flash(format!("Failed to export: {:#}", e)),
        }
    }

    // Help overlay

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
