use tracing::{debug, info};

use crate::domain::filter::Filter;
use crate::domain::theme::Theme;
use crate::domain::todo::{IdSequence, Todo, TodoId};
use crate::domain::view::{DerivedView, derive};
use crate::prefs::{self, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    /// An item is grabbed; `from` is its current index in the full list.
    Dragging { from: usize },
}

pub struct App<P: PreferenceStore> {
    prefs: P,
    todos: Vec<Todo>,
    ids: IdSequence,
    pub filter: Filter,
    pub theme: Theme,
    pub selected: usize,
    pub mode: InputMode,
    pub input: String,
    pub status: Option<String>,
}

impl<P: PreferenceStore> App<P> {
    pub fn new(prefs: P, seed: Vec<Todo>) -> Self {
        let theme = prefs::load_theme(&prefs);
        let ids = IdSequence::after(&seed);
        info!(items = seed.len(), theme = theme.as_str(), "session started");
        Self {
            prefs,
            todos: seed,
            ids,
            filter: Filter::default(),
            theme,
            selected: 0,
            mode: InputMode::Normal,
            input: String::new(),
            status: None,
        }
    }

    #[cfg(test)]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    #[cfg(test)]
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn view(&self) -> DerivedView<'_> {
        derive(&self.todos, self.filter)
    }

    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.ids.next();
        self.todos.push(Todo::new(id, text));
        self.input.clear();
        debug!(%id, "added todo");
        Some(id)
    }

    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                debug!(%id, completed = todo.completed, "toggled todo");
                self.clamp_selection();
                true
            }
            None => false,
        }
    }

    /// Moves the item at `from` to `to`, both positions in the full list.
    /// Out-of-range positions leave the list untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.todos.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let todo = self.todos.remove(from);
        self.todos.insert(to, todo);
        debug!(from, to, "moved todo");
        true
    }

    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();
        if removed > 0 {
            debug!(removed, "cleared completed todos");
        }
        self.clamp_selection();
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    /// Flips the theme in memory, then persists it best-effort.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        prefs::save_theme(&mut self.prefs, self.theme);
        info!(theme = self.theme.as_str(), "theme changed");
        self.theme
    }

    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input);
        if self.add(&input).is_some() {
            self.mode = InputMode::Normal;
            self.select_last();
            self.set_status("Added");
        } else {
            self.input = input;
            self.set_status("Cannot add an empty task");
        }
    }

    pub fn select_next(&mut self) {
        let len = self.view().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_last(&mut self) {
        self.selected = self.view().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.view().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn selected_id(&self) -> Option<TodoId> {
        self.view().items.get(self.selected).map(|(_, t)| t.id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.toggle(id);
            self.set_status("Toggled completion");
        }
    }

    pub fn clear_done(&mut self) {
        match self.clear_completed() {
            0 => self.set_status("Nothing to clear"),
            n => self.set_status(&format!("Cleared {n} completed")),
        }
    }

    pub fn cycle_filter(&mut self) {
        self.select_filter(self.filter.next());
    }

    pub fn select_filter(&mut self, filter: Filter) {
        self.set_filter(filter);
        self.set_status(&format!("Showing {}", filter.label()));
    }

    pub fn switch_theme(&mut self) {
        let theme = self.toggle_theme();
        self.set_status(&format!("Theme: {}", theme.as_str()));
    }

    pub fn grab_selected(&mut self) {
        if let Some(from) = self.view().full_index(self.selected) {
            self.mode = InputMode::Dragging { from };
            // the hint line shows the drag keys while nothing else is reported
            self.status = None;
        }
    }

    /// One step of a drag: the grabbed item crosses the boundary of its
    /// visible neighbour and takes that neighbour's full-list position.
    pub fn drag_by(&mut self, down: bool) {
        let InputMode::Dragging { from } = self.mode else {
            return;
        };
        let target_pos = if down {
            self.selected + 1
        } else {
            match self.selected.checked_sub(1) {
                Some(pos) => pos,
                None => return,
            }
        };
        let Some(to) = self.view().full_index(target_pos) else {
            return;
        };
        if self.move_item(from, to) {
            self.mode = InputMode::Dragging { from: to };
            self.selected = target_pos;
        }
    }

    pub fn drop_grabbed(&mut self) {
        if matches!(self.mode, InputMode::Dragging { .. }) {
            self.mode = InputMode::Normal;
            self.set_status("Dropped");
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status = Some(msg.to_string());
    }
}
