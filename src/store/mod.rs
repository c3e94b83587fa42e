use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::list::List;
use crate::models::todo::Todo;

pub const LIST_NAME_MAX: usize = 100;
pub const TODO_NAME_MAX: usize = 50;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("The specified list was not found.")]
    ListNotFound(u64),
    #[error("The specified todo was not found.")]
    TodoNotFound(u64, u64),
}

/// One-shot message consumed by the next rendered page.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum Flash {
    Success(String),
    Error(String),
}

pub fn validate_list_name(
    name: &str,
    lists: &[List],
    exclude_id: Option<u64>,
) -> Result<(), StoreError> {
    let length = name.chars().count();
    if length < 1 || length > LIST_NAME_MAX {
        return Err(StoreError::Validation(
            "List name must be between 1 and 100 characters.".to_string(),
        ));
    }
    if lists
        .iter()
        .any(|list| exclude_id != Some(list.id) && list.name == name)
    {
        return Err(StoreError::Validation(
            "List name must be unique.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_todo_name(name: &str, list: &List) -> Result<(), StoreError> {
    let length = name.chars().count();
    if length < 1 || length > TODO_NAME_MAX {
        return Err(StoreError::Validation(
            "Todo name must be between 1 and 50 characters.".to_string(),
        ));
    }
    if list.todos.iter().any(|todo| todo.name == name) {
        return Err(StoreError::Validation(
            "Todo name must be unique.".to_string(),
        ));
    }
    Ok(())
}

/// All todo-list state owned by a single session. Every mutating operation
/// validates up front and leaves the state untouched on failure.
#[derive(Default, Debug)]
pub struct Session {
    lists: Vec<List>,
    next_list_id: u64,
    flash: Option<Flash>,
}

impl Session {
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn find_list(&self, id: u64) -> Option<&List> {
        self.lists.iter().find(|list| list.id == id)
    }

    fn find_list_mut(&mut self, id: u64) -> Result<&mut List, StoreError> {
        self.lists
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or(StoreError::ListNotFound(id))
    }

    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    pub fn create_list(&mut self, name: &str) -> Result<u64, StoreError> {
        validate_list_name(name, &self.lists, None)?;
        self.next_list_id += 1;
        let id = self.next_list_id;
        self.lists.push(List::new(id, name.to_string()));
        Ok(id)
    }

    pub fn rename_list(&mut self, id: u64, name: &str) -> Result<(), StoreError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or(StoreError::ListNotFound(id))?;
        if self.lists[index].name == name {
            // Re-submitting the current name is a successful no-op.
            return Ok(());
        }
        validate_list_name(name, &self.lists, Some(id))?;
        self.lists[index].name = name.to_string();
        Ok(())
    }

    pub fn delete_list(&mut self, id: u64) -> Result<List, StoreError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or(StoreError::ListNotFound(id))?;
        Ok(self.lists.remove(index))
    }

    pub fn add_todo(&mut self, list_id: u64, name: &str) -> Result<u64, StoreError> {
        let list = self.find_list_mut(list_id)?;
        validate_todo_name(name, list)?;
        let id = list.next_todo_id();
        list.todos.push(Todo {
            id,
            name: name.to_string(),
            completed: false,
        });
        Ok(id)
    }

    pub fn toggle_todo(
        &mut self,
        list_id: u64,
        todo_id: u64,
        completed: bool,
    ) -> Result<(), StoreError> {
        let list = self.find_list_mut(list_id)?;
        let todo = list
            .find_todo_mut(todo_id)
            .ok_or(StoreError::TodoNotFound(list_id, todo_id))?;
        todo.completed = completed;
        Ok(())
    }

    pub fn delete_todo(&mut self, list_id: u64, todo_id: u64) -> Result<Todo, StoreError> {
        let list = self.find_list_mut(list_id)?;
        let index = list
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(StoreError::TodoNotFound(list_id, todo_id))?;
        Ok(list.todos.remove(index))
    }

    pub fn complete_all(&mut self, list_id: u64) -> Result<(), StoreError> {
        let list = self.find_list_mut(list_id)?;
        if list.todos.is_empty() {
            return Err(StoreError::Validation(
                "The list has no todos to complete.".to_string(),
            ));
        }
        for todo in &mut list.todos {
            todo.completed = true;
        }
        Ok(())
    }
}

/// Session-keyed state shared with the handlers through `web::Data`.
/// Sessions come into existence the first time their id is touched.
#[derive(Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_sessions(&self) -> Arc<Mutex<HashMap<Uuid, Session>>> {
        self.sessions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_name_length_boundaries() {
        let mut session = Session::default();
        assert!(session.create_list(&"a".repeat(100)).is_ok());
        assert_eq!(
            session.create_list(&"a".repeat(101)),
            Err(StoreError::Validation(
                "List name must be between 1 and 100 characters.".to_string()
            ))
        );
        assert!(session.create_list("").is_err());
        assert_eq!(session.lists().len(), 1);
    }

    #[test]
    fn test_duplicate_list_name_rejected() {
        let mut session = Session::default();
        session.create_list("Groceries").unwrap();
        assert_eq!(
            session.create_list("Groceries"),
            Err(StoreError::Validation(
                "List name must be unique.".to_string()
            ))
        );
        // Uniqueness is case-sensitive exact match.
        assert!(session.create_list("groceries").is_ok());
    }

    #[test]
    fn test_delete_missing_list() {
        let mut session = Session::default();
        session.create_list("One").unwrap();
        session.create_list("Two").unwrap();
        assert!(matches!(
            session.delete_list(3),
            Err(StoreError::ListNotFound(3))
        ));
        assert_eq!(session.lists().len(), 2);
    }

    #[test]
    fn test_list_ids_never_reused() {
        let mut session = Session::default();
        let first = session.create_list("Groceries").unwrap();
        session.delete_list(first).unwrap();
        let second = session.create_list("Chores").unwrap();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_rename_list() {
        let mut session = Session::default();
        let id = session.create_list("Groceries").unwrap();
        session.create_list("Chores").unwrap();

        assert!(matches!(
            session.rename_list(99, "Anything"),
            Err(StoreError::ListNotFound(99))
        ));
        // Same name again is a no-op success, not a uniqueness failure.
        assert!(session.rename_list(id, "Groceries").is_ok());
        assert_eq!(
            session.rename_list(id, "Chores"),
            Err(StoreError::Validation(
                "List name must be unique.".to_string()
            ))
        );
        session.rename_list(id, "Errands").unwrap();
        assert_eq!(session.find_list(id).unwrap().name, "Errands");
    }

    #[test]
    fn test_todo_name_validation() {
        let mut session = Session::default();
        let id = session.create_list("Groceries").unwrap();
        assert!(session.add_todo(id, &"b".repeat(50)).is_ok());
        assert_eq!(
            session.add_todo(id, &"b".repeat(51)),
            Err(StoreError::Validation(
                "Todo name must be between 1 and 50 characters.".to_string()
            ))
        );
        session.add_todo(id, "Milk").unwrap();
        assert_eq!(
            session.add_todo(id, "Milk"),
            Err(StoreError::Validation(
                "Todo name must be unique.".to_string()
            ))
        );
        assert!(matches!(
            session.add_todo(99, "Milk"),
            Err(StoreError::ListNotFound(99))
        ));
    }

    #[test]
    fn test_toggle_and_derived_completion() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        assert!(!session.find_list(list_id).unwrap().all_completed());

        let todo_id = session.add_todo(list_id, "Milk").unwrap();
        session.toggle_todo(list_id, todo_id, true).unwrap();
        assert!(session.find_list(list_id).unwrap().all_completed());

        session.toggle_todo(list_id, todo_id, false).unwrap();
        let list = session.find_list(list_id).unwrap();
        assert!(!list.all_completed());
        assert_eq!(list.todos_remaining_count(), 1);

        assert!(matches!(
            session.toggle_todo(list_id, 99, true),
            Err(StoreError::TodoNotFound(_, 99))
        ));
    }

    #[test]
    fn test_todo_ids_never_reused() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        let first = session.add_todo(list_id, "Milk").unwrap();
        session.delete_todo(list_id, first).unwrap();
        let second = session.add_todo(list_id, "Eggs").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_todo() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        let todo_id = session.add_todo(list_id, "Milk").unwrap();

        let removed = session.delete_todo(list_id, todo_id).unwrap();
        assert_eq!(removed.name, "Milk");
        assert!(session.find_list(list_id).unwrap().todos.is_empty());
        assert!(matches!(
            session.delete_todo(list_id, todo_id),
            Err(StoreError::TodoNotFound(_, _))
        ));
    }

    #[test]
    fn test_complete_all_on_empty_list() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        assert_eq!(
            session.complete_all(list_id),
            Err(StoreError::Validation(
                "The list has no todos to complete.".to_string()
            ))
        );
        assert!(session.find_list(list_id).unwrap().todos.is_empty());
    }

    #[test]
    fn test_complete_all_marks_every_todo() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        session.add_todo(list_id, "Milk").unwrap();
        session.add_todo(list_id, "Eggs").unwrap();

        session.complete_all(list_id).unwrap();
        assert!(session.find_list(list_id).unwrap().all_completed());

        assert!(matches!(
            session.complete_all(99),
            Err(StoreError::ListNotFound(99))
        ));
    }

    #[test]
    fn test_flash_is_consumed_once() {
        let mut session = Session::default();
        session.set_flash(Flash::Success("The list has been created.".to_string()));
        assert_eq!(
            session.take_flash(),
            Some(Flash::Success("The list has been created.".to_string()))
        );
        assert_eq!(session.take_flash(), None);
    }

    #[test]
    fn test_failed_validation_leaves_state_unchanged() {
        let mut session = Session::default();
        let list_id = session.create_list("Groceries").unwrap();
        session.add_todo(list_id, "Milk").unwrap();

        assert!(session.add_todo(list_id, "").is_err());
        assert!(session.rename_list(list_id, &"a".repeat(101)).is_err());

        let list = session.find_list(list_id).unwrap();
        assert_eq!(list.name, "Groceries");
        assert_eq!(list.todos.len(), 1);
    }
}
