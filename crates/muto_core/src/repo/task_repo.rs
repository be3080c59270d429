//! Task repository contract and volatile implementation.
//!
//! # Invariants
//! - `insert` appends; `remove` keeps the relative order of the remaining tasks.
//! - Unknown IDs are reported with `None`, never with an error.

use crate::model::task::{Task, TaskId};

/// Data-access contract for the ordered task collection.
pub trait TaskRepository {
    fn insert(&mut self, task: Task);
    fn get(&self, id: TaskId) -> Option<&Task>;
    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task>;
    fn remove(&mut self, id: TaskId) -> Option<Task>;
    /// All tasks in insertion order.
    fn list(&self) -> &[Task];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Process-lifetime task storage backed by a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Vec<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert(&mut self, task: Task) {
        self.tasks.push(task);
    }

    fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    fn list(&self) -> &[Task] {
        &self.tasks
    }
}
