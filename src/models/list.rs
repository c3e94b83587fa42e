use serde::{Deserialize, Serialize};

use crate::models::todo::Todo;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: u64,
    pub name: String,
    pub todos: Vec<Todo>,
    #[serde(skip)]
    next_todo_id: u64,
}

impl List {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            todos: Vec::new(),
            next_todo_id: 0,
        }
    }

    /// Hands out the next todo id. The counter only ever moves forward, so
    /// ids are never reused after a todo has been deleted.
    pub fn next_todo_id(&mut self) -> u64 {
        self.next_todo_id += 1;
        self.next_todo_id
    }

    pub fn find_todo_mut(&mut self, todo_id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == todo_id)
    }

    /// A list counts as complete once it has at least one todo and none of
    /// them remain open. This is always derived, never stored.
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }
}
