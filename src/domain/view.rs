use super::filter::Filter;
use super::todo::Todo;

/// Filtered projection of the list. Every entry keeps its index in the full
/// list so reordering never works on filtered positions.
#[derive(Debug)]
pub struct DerivedView<'a> {
    pub items: Vec<(usize, &'a Todo)>,
    /// Active items across the whole list, whatever the filter.
    pub remaining: usize,
}

impl DerivedView<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn full_index(&self, pos: usize) -> Option<usize> {
        self.items.get(pos).map(|(idx, _)| *idx)
    }
}

pub fn derive(todos: &[Todo], filter: Filter) -> DerivedView<'_> {
    let items = todos
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .collect();
    let remaining = todos.iter().filter(|t| !t.completed).count();
    DerivedView { items, remaining }
}

pub fn remaining_label(n: usize) -> String {
    if n == 1 {
        "1 item left".to_string()
    } else {
        format!("{n} items left")
    }
}
