use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Hands out ids that stay unique for the whole session, even after items
/// are cleared from the list.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn after(existing: &[Todo]) -> Self {
        let max = existing.iter().map(|t| t.id.0).max().unwrap_or(0);
        Self { next: max + 1 }
    }

    pub fn next(&mut self) -> TodoId {
        let id = TodoId(self.next);
        self.next += 1;
        id
    }
}

pub fn seed_todos() -> Vec<Todo> {
    [
        "Complete online JavaScript course",
        "Jog around the park 3x",
        "10 minutes meditation",
        "Read for 1 hour",
        "Pick up groceries",
        "Complete Todo App on Frontend Mentor",
    ]
    .into_iter()
    .zip(1..)
    .map(|(text, id)| Todo::new(TodoId(id), text))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_six_active_items_numbered_from_one() {
        let seed = seed_todos();
        assert_eq!(seed.len(), 6);
        assert!(seed.iter().all(|t| !t.completed));
        let ids: Vec<u64> = seed.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn id_sequence_starts_past_largest_existing_id() {
        let todos = vec![Todo::new(TodoId(4), "a"), Todo::new(TodoId(9), "b")];
        let mut ids = IdSequence::after(&todos);
        assert_eq!(ids.next(), TodoId(10));
        assert_eq!(ids.next(), TodoId(11));
    }

    #[test]
    fn id_sequence_on_empty_list_starts_at_one() {
        let mut ids = IdSequence::after(&[]);
        assert_eq!(ids.next(), TodoId(1));
    }
}
