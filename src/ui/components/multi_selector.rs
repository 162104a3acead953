//! Multi-value tag selector with asynchronous option search.
//!
//! Typed text is debounced and handed to an injected [`OptionSource`]; the
//! results fill a dropdown below the input. Picked options become tags. The
//! selector validates the number of tags against optional bounds and shows
//! fetch failures and bound violations inline instead of returning them.
//!
//! Keys (while focused):
//! - type / Backspace: edit the query (Backspace on an empty query removes the last tag)
//! - Down / Up: open the dropdown and move the cursor
//! - Enter: pick the highlighted option, or commit the typed text as a tag
//! - Ctrl+U: clear all tags
//! - Esc: close the dropdown, or cancel when it is already closed

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::{debug, trace, warn};

use crate::selector::{
    check_bounds, sanitize_message, ActionType, Debouncer, DisplayOption, FetchError,
    OptionSource, QueryState, SelectOption, SelectionOwnership, SelectorConfig, SelectorMessage,
    SelectorTasks,
};
use crate::ui::theme::Theme;

/// A selection change accepted by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The full new selection.
    pub value: Vec<String>,
    /// What caused the change.
    pub action: ActionType,
    /// The options the selection was made from.
    pub data_source: Vec<SelectOption>,
}

/// Action resulting from selector input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    /// The selection changed. In controlled mode the host must mirror it back
    /// with `on_external_value_changed`.
    Changed(ChangeEvent),
    /// Esc was pressed with the dropdown already closed.
    Cancel,
}

/// Multi-value tag selector.
pub struct MultiSelector {
    /// Configuration fixed at construction.
    config: SelectorConfig,
    /// Decided once from whether a controlling value was supplied.
    ownership: SelectionOwnership,
    /// Where options come from.
    source: Arc<dyn OptionSource>,
    /// Spawns fetch and timer tasks.
    tasks: SelectorTasks,
    /// Current selection, in tag order.
    value: Vec<String>,
    /// Whether the latest fetch is still in flight.
    loading: bool,
    /// Options currently backing the dropdown.
    data_source: Option<Vec<SelectOption>>,
    /// Whether the dropdown is open.
    visible: bool,
    /// Inline error text.
    error_message: Option<String>,
    /// Last result for the empty query.
    empty_query_cache: Option<Vec<SelectOption>>,
    /// Pending debounce timer.
    debouncer: Debouncer,
    /// Bumped on every keystroke; only the newest timer may trigger a fetch.
    debounce_ticket: u64,
    /// Id of the newest fetch issued.
    last_request_id: u64,
    /// Results that settled after a newer fetch was issued.
    stale_responses: usize,
    /// Set by `dispose`; the selector ignores everything afterwards.
    disposed: bool,
    /// Text typed into the input.
    input: String,
    /// Highlighted dropdown row.
    cursor: usize,
    /// Every option seen so far, for tag text.
    known: HashMap<String, SelectOption>,
    theme: Theme,
}

impl MultiSelector {
    /// Create a selector.
    ///
    /// The initial value is the controlling `value` if one was supplied,
    /// otherwise `default_value`, otherwise empty.
    pub fn new(config: SelectorConfig, source: Arc<dyn OptionSource>, tasks: SelectorTasks) -> Self {
        let ownership = config.ownership();
        let value = config.initial_value();
        let debouncer = Debouncer::new(config.debounce);
        let mut known = HashMap::new();
        for option in &config.default_data_source {
            known.insert(option.value.clone(), option.clone());
        }
        debug!(
            ?ownership,
            initial = value.len(),
            min = ?config.min,
            max = ?config.max,
            "Creating multi selector"
        );

        Self {
            data_source: Some(config.default_data_source.clone()),
            config,
            ownership,
            source,
            tasks,
            value,
            loading: false,
            visible: false,
            error_message: None,
            empty_query_cache: None,
            debouncer,
            debounce_ticket: 0,
            last_request_id: 0,
            stale_responses: 0,
            disposed: false,
            input: String::new(),
            cursor: 0,
            known,
            theme: Theme::default(),
        }
    }

    /// Replace the color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The current selection.
    pub fn value(&self) -> &[String] {
        &self.value
    }

    pub fn ownership(&self) -> SelectionOwnership {
        self.ownership
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the dropdown is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The inline error text, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Text typed into the input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The options backing the dropdown, before placeholder derivation.
    pub fn raw_data_source(&self) -> Option<&[SelectOption]> {
        self.data_source.as_deref()
    }

    /// The cached result for the empty query.
    pub fn cached_empty_result(&self) -> Option<&[SelectOption]> {
        self.empty_query_cache.as_deref()
    }

    /// Number of fetch results dropped because a newer fetch was issued.
    pub fn stale_responses(&self) -> usize {
        self.stale_responses
    }

    /// Whether a debounced search is waiting to fire.
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Issue a fetch for `query`.
    ///
    /// For the empty query with a cached result, the cache is shown at once
    /// (no loading state) and a fresh request refreshes it in the background.
    /// Otherwise the dropdown switches to loading. Either way the error is
    /// cleared and exactly one request is issued. Earlier requests are not
    /// cancelled; their results are dropped when they settle.
    pub fn fetch_data(&mut self, query: QueryState) {
        if self.disposed {
            return;
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.visible = true;
        self.error_message = None;

        let cached = if query.is_empty() {
            self.empty_query_cache.clone()
        } else {
            None
        };
        match cached {
            Some(cached) => {
                debug!(request_id, options = cached.len(), "Showing cached empty-query result");
                self.remember(&cached);
                self.data_source = Some(cached);
                self.loading = false;
                self.cursor = 0;
                self.prune_known();
            }
            None => {
                debug!(request_id, query = %query.input_value, "Fetching options");
                self.loading = true;
            }
        }

        self.tasks
            .spawn_fetch(self.source.as_ref(), query, request_id);
    }

    /// Schedule a debounced search for the typed text.
    ///
    /// Each call replaces the pending timer; only the last text within the
    /// quiet window is fetched.
    pub fn on_input_change(&mut self, text: &str) {
        if self.disposed {
            return;
        }

        self.debounce_ticket += 1;
        let ticket = self.debounce_ticket;
        trace!(
            ticket,
            text,
            delay = ?self.debouncer.delay(),
            "Scheduling debounced search"
        );
        let action = self.tasks.search_ready(QueryState::new(text), ticket);
        self.debouncer.schedule(action);
    }

    /// React to the input gaining focus.
    ///
    /// With `focus_fetch` enabled, a focus caused by the user fetches the
    /// empty query to pre-populate the dropdown. Programmatic focus does not.
    pub fn on_input_focus(&mut self, by_user: bool) {
        if self.config.focus_fetch && by_user && !self.config.disabled {
            self.fetch_data(QueryState::default());
        }
    }

    /// Apply a new full selection.
    ///
    /// Selections outside the `min`/`max` bounds are rejected: the value is
    /// kept and the error message set. Otherwise the selector stores the value
    /// (uncontrolled mode only) and returns a change event when the selection
    /// differs from the current one.
    pub fn on_change(
        &mut self,
        selection: Vec<String>,
        action: ActionType,
        data_source: Vec<SelectOption>,
    ) -> Option<ChangeEvent> {
        if let Err(err) = check_bounds(selection.len(), self.config.min, self.config.max) {
            debug!(count = selection.len(), %err, "Rejected selection change");
            self.error_message = Some(err.to_string());
            return None;
        }

        let changed = selection != self.value;
        if self.ownership == SelectionOwnership::Internal {
            self.value = selection.clone();
            self.prune_known();
        }

        if !changed {
            return None;
        }

        debug!(action = action.as_str(), count = selection.len(), "Selection changed");
        Some(ChangeEvent {
            value: selection,
            action,
            data_source,
        })
    }

    /// Open or close the dropdown.
    ///
    /// Only an actual change of visibility clears the error message.
    pub fn on_visible_change(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.error_message = None;
        }
    }

    /// Mirror a value pushed by the host.
    ///
    /// Only meaningful for a controlled selector; an uncontrolled selector
    /// owns its value and ignores the update.
    pub fn on_external_value_changed(&mut self, value: Vec<String>) {
        match self.ownership {
            SelectionOwnership::External => self.value = value,
            SelectionOwnership::Internal => {
                warn!("Ignoring external value for an uncontrolled selector");
            }
        }
    }

    /// Tear the selector down.
    ///
    /// Cancels the pending debounce timer. Messages that arrive afterwards
    /// are ignored, so no fetch is issued after this call.
    pub fn dispose(&mut self) {
        if self.debouncer.cancel() {
            debug!("Cancelled pending search on dispose");
        }
        self.disposed = true;
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: SelectorMessage) {
        match message {
            SelectorMessage::SearchReady { query, ticket } => {
                if self.disposed || ticket != self.debounce_ticket {
                    trace!(ticket, "Ignoring superseded search");
                    return;
                }
                self.fetch_data(query);
            }
            SelectorMessage::OptionsFetched {
                request_id,
                query,
                result,
            } => self.apply_fetch_result(request_id, query, result),
        }
    }

    fn apply_fetch_result(
        &mut self,
        request_id: u64,
        query: QueryState,
        result: Result<Vec<SelectOption>, FetchError>,
    ) {
        if self.disposed {
            return;
        }
        let latest = request_id == self.last_request_id;

        match result {
            Ok(options) => {
                if query.is_empty() {
                    self.empty_query_cache = Some(options.clone());
                }
                if !latest {
                    self.stale_responses += 1;
                    debug!(request_id, latest = self.last_request_id, "Dropping stale options");
                    return;
                }
                debug!(request_id, options = options.len(), "Options fetched");
                self.remember(&options);
                self.data_source = Some(options);
                self.loading = false;
                self.visible = true;
                self.cursor = 0;
                self.prune_known();
            }
            Err(err) => {
                if !latest {
                    self.stale_responses += 1;
                    debug!(request_id, %err, "Dropping stale fetch failure");
                    return;
                }
                warn!(request_id, query = %query.input_value, error = %err, "Option fetch failed");
                self.error_message = Some(err.message().to_string());
                self.data_source = None;
                self.loading = false;
                self.visible = true;
                self.cursor = 0;
            }
        }
    }

    fn remember(&mut self, options: &[SelectOption]) {
        for option in options {
            self.known.insert(option.value.clone(), option.clone());
        }
    }

    /// Forget options that are neither selected nor on display.
    fn prune_known(&mut self) {
        let shown = self.data_source.as_deref().unwrap_or_default();
        let value = &self.value;
        self.known.retain(|key, _| {
            value.contains(key) || shown.iter().any(|option| &option.value == key)
        });
    }

    /// Rows the dropdown shows.
    ///
    /// Loading yields one disabled "Searching..." row; an empty result set
    /// yields one disabled "No matches" row; otherwise every option is shown
    /// with its custom rendering, or its own label.
    pub fn data_source(&self) -> Vec<DisplayOption> {
        if self.loading {
            return vec![DisplayOption::loading()];
        }

        match &self.data_source {
            Some(options) if options.is_empty() => vec![DisplayOption::no_matches()],
            Some(options) => options
                .iter()
                .map(|option| DisplayOption {
                    label: match &self.config.item_render {
                        Some(render) => render(option),
                        None => option.label.clone(),
                    },
                    value: option.value.clone(),
                    disabled: option.disabled,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Text shown for a selected value.
    pub fn tag_text(&self, value: &str) -> String {
        self.known
            .get(value)
            .map(|option| option.fill_text(self.config.fill_props).to_string())
            .unwrap_or_else(|| value.to_string())
    }

    fn current_options(&self) -> Vec<SelectOption> {
        self.data_source.clone().unwrap_or_default()
    }

    fn cancel_pending_search(&mut self) {
        self.debounce_ticket += 1;
        self.debouncer.cancel();
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent view.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SelectorAction> {
        if self.disposed || self.config.disabled {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return None;
                }
                let options = self.current_options();
                self.on_change(Vec::new(), ActionType::Clear, options)
                    .map(SelectorAction::Changed)
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.input.push(c);
                let text = self.input.clone();
                self.on_input_change(&text);
                None
            }
            (KeyCode::Backspace, _) => {
                if self.input.pop().is_some() {
                    let text = self.input.clone();
                    self.on_input_change(&text);
                    return None;
                }
                let mut next = self.value.clone();
                next.pop()?;
                let options = self.current_options();
                self.on_change(next, ActionType::Tag, options)
                    .map(SelectorAction::Changed)
            }
            (KeyCode::Down, _) => {
                if !self.visible {
                    self.on_visible_change(true);
                } else {
                    let rows = self.data_source().len();
                    if rows > 0 && self.cursor < rows - 1 {
                        self.cursor += 1;
                    }
                }
                None
            }
            (KeyCode::Up, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                None
            }
            (KeyCode::Enter, _) => self.handle_enter(),
            (KeyCode::Esc, _) => {
                if self.visible {
                    self.on_visible_change(false);
                    None
                } else {
                    Some(SelectorAction::Cancel)
                }
            }
            _ => None,
        }
    }

    fn handle_enter(&mut self) -> Option<SelectorAction> {
        let highlighted = if self.visible {
            self.data_source()
                .into_iter()
                .nth(self.cursor)
                .filter(|row| !row.disabled)
        } else {
            None
        };

        let (next, action) = match highlighted {
            Some(row) => {
                let mut next = self.value.clone();
                match next.iter().position(|v| *v == row.value) {
                    Some(index) => {
                        next.remove(index);
                    }
                    None => next.push(row.value),
                }
                (next, ActionType::ItemClick)
            }
            None => {
                let raw = self.input.trim().to_string();
                if raw.is_empty() {
                    return None;
                }
                if self.value.contains(&raw) {
                    self.input.clear();
                    self.cancel_pending_search();
                    return None;
                }
                let mut next = self.value.clone();
                next.push(raw);
                (next, ActionType::Enter)
            }
        };

        // Close before applying so a bounds error stays visible.
        self.on_visible_change(false);
        self.input.clear();
        self.cancel_pending_search();
        let options = self.current_options();
        self.on_change(next, action, options)
            .map(SelectorAction::Changed)
    }

    /// Render the selector and, when open, its dropdown.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let error_rows = u16::from(self.error_message.is_some());
        let selector_area = Rect {
            x: area.x,
            y: area.y,
            width: self.config.width.min(area.width),
            height: (4 + error_rows).min(area.height),
        };

        let name = if self.config.class_name.is_empty() {
            "Tags"
        } else {
            self.config.class_name.as_str()
        };
        let block = Block::default()
            .title(format!(" {} ({}) ", name, self.value.len()))
            .borders(Borders::ALL)
            .border_style(
                self.theme
                    .border_style(focused && !self.config.disabled),
            )
            .style(self.config.style);

        let inner = block.inner(selector_area);
        frame.render_widget(block, selector_area);

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        if self.error_message.is_some() {
            constraints.push(Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        frame.render_widget(Paragraph::new(self.tags_line()), chunks[0]);
        frame.render_widget(Paragraph::new(self.input_line(focused)), chunks[1]);

        if let Some(message) = &self.error_message {
            let error = Span::styled(
                sanitize_message(message),
                Style::default().fg(self.theme.error),
            );
            frame.render_widget(Paragraph::new(Line::from(error)), chunks[2]);
        }

        if self.visible {
            self.render_dropdown(frame, area, selector_area);
        }
    }

    fn tags_line(&self) -> Line<'_> {
        if self.value.is_empty() {
            return Line::from(Span::styled(
                "No tags selected",
                Style::default().fg(self.theme.muted),
            ));
        }

        let chip = Style::default().fg(Color::White).bg(self.theme.tag);
        let mut spans = Vec::with_capacity(self.value.len() * 2);
        for value in &self.value {
            spans.push(Span::styled(format!(" {} ", self.tag_text(value)), chip));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn input_line(&self, focused: bool) -> Line<'_> {
        let muted = Style::default().fg(self.theme.muted);
        let mut spans = vec![Span::styled("> ", muted)];
        if self.input.is_empty() {
            spans.push(Span::styled(self.config.placeholder.as_str(), muted));
        } else {
            spans.push(Span::raw(self.input.as_str()));
        }
        if focused && !self.config.disabled {
            spans.push(Span::styled("▏", Style::default().fg(self.theme.focused_border)));
        }
        Line::from(spans)
    }

    fn render_dropdown(&self, frame: &mut Frame, area: Rect, anchor: Rect) {
        let rows = self.data_source();
        let y = anchor.bottom();
        let available = area.bottom().saturating_sub(y);
        let height = dropdown_height(rows.len(), self.config.size.dropdown_rows()).min(available);
        if height < 3 {
            return;
        }

        let dropdown_area = Rect {
            x: anchor.x,
            y,
            width: anchor.width,
            height,
        };
        frame.render_widget(Clear, dropdown_area);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let selected = self.value.contains(&row.value);
                let style = if row.is_placeholder() {
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::ITALIC)
                } else if row.disabled {
                    Style::default().fg(self.theme.muted)
                } else if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                let marker = if selected { "✓ " } else { "  " };
                ListItem::new(format!("{}{}", marker, row.label)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(true)),
            )
            .highlight_style(self.theme.highlight_style());

        let mut state = ListState::default();
        if rows.get(self.cursor).map(|row| !row.disabled).unwrap_or(false) {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, dropdown_area, &mut state);
    }
}

/// Dropdown height in terminal rows, borders included.
fn dropdown_height(rows: usize, max_rows: u16) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).clamp(1, max_rows) + 2
}

impl Drop for MultiSelector {
    fn drop(&mut self) {
        self.dispose();
    }
}
