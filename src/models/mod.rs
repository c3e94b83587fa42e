pub mod list;
pub mod todo;
