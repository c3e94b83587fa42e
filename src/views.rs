use serde::Serialize;

use crate::models::list::List;
use crate::models::todo::Todo;
use crate::store::Flash;

/// A list as shown on the index page, with its derived completion fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary<'a> {
    pub id: u64,
    pub name: &'a str,
    pub completed: bool,
    pub todos_count: usize,
    pub todos_remaining_count: usize,
}

impl<'a> ListSummary<'a> {
    fn new(list: &'a List) -> Self {
        Self {
            id: list.id,
            name: &list.name,
            completed: list.all_completed(),
            todos_count: list.todos.len(),
            todos_remaining_count: list.todos_remaining_count(),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsPage<'a> {
    pub lists: Vec<ListSummary<'a>>,
    pub flash: Option<Flash>,
}

impl<'a> ListsPage<'a> {
    pub fn new(lists: &'a [List], flash: Option<Flash>) -> Self {
        Self {
            lists: sort_lists(lists).into_iter().map(ListSummary::new).collect(),
            flash,
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<'a> {
    pub id: u64,
    pub name: &'a str,
    pub completed: bool,
    pub todos_count: usize,
    pub todos_remaining_count: usize,
    pub todos: Vec<&'a Todo>,
    pub flash: Option<Flash>,
    pub error: Option<String>,
}

impl<'a> ListPage<'a> {
    pub fn new(list: &'a List, flash: Option<Flash>, error: Option<String>) -> Self {
        Self {
            id: list.id,
            name: &list.name,
            completed: list.all_completed(),
            todos_count: list.todos.len(),
            todos_remaining_count: list.todos_remaining_count(),
            todos: sort_todos(&list.todos),
            flash,
            error,
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListForm<'a> {
    pub list_name: &'a str,
    pub error: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditListForm<'a> {
    pub id: u64,
    pub list_name: &'a str,
    pub error: Option<String>,
}

/// Display order: lists with open todos first, finished lists last. Order
/// within each group is preserved.
pub fn sort_lists(lists: &[List]) -> Vec<&List> {
    let (open, done): (Vec<&List>, Vec<&List>) =
        lists.iter().partition(|list| !list.all_completed());
    open.into_iter().chain(done).collect()
}

pub fn sort_todos(todos: &[Todo]) -> Vec<&Todo> {
    let (open, done): (Vec<&Todo>, Vec<&Todo>) = todos.iter().partition(|todo| !todo.completed);
    open.into_iter().chain(done).collect()
}
