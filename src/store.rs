// File: src/store.rs
use crate::model::Task;
use std::fmt;
use thiserror::Error;

/// A 1-based position as typed by the user.
///
/// The value is kept exactly as parsed (it may be zero or negative) so that
/// the store, not the parser, decides whether it resolves to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIndex(i64);

impl TaskIndex {
    pub fn one_based(n: i64) -> Self {
        Self(n)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// The only place where user positions become vector offsets.
    fn position(&self, len: usize) -> Option<usize> {
        let n = usize::try_from(self.0).ok()?;
        (1..=len).contains(&n).then(|| n - 1)
    }
}

impl fmt::Display for TaskIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskListError {
    #[error("There is no task number {index}. {}", describe_len(.len))]
    OutOfRange { index: i64, len: usize },
}

fn describe_len(len: &usize) -> String {
    match *len {
        0 => "Your list is empty.".to_string(),
        1 => "You only have 1 task.".to_string(),
        n => format!("Pick a number between 1 and {}.", n),
    }
}

/// Ordered task collection. A task's identity is its position.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    fn resolve(&self, index: TaskIndex) -> Result<usize, TaskListError> {
        index
            .position(self.tasks.len())
            .ok_or(TaskListError::OutOfRange {
                index: index.get(),
                len: self.tasks.len(),
            })
    }

    /// Removes the task; later tasks shift down by one.
    pub fn delete(&mut self, index: TaskIndex) -> Result<Task, TaskListError> {
        let pos = self.resolve(index)?;
        Ok(self.tasks.remove(pos))
    }

    pub fn mark(&mut self, index: TaskIndex) -> Result<&Task, TaskListError> {
        self.set_done(index, true)
    }

    pub fn unmark(&mut self, index: TaskIndex) -> Result<&Task, TaskListError> {
        self.set_done(index, false)
    }

    fn set_done(&mut self, index: TaskIndex, done: bool) -> Result<&Task, TaskListError> {
        let pos = self.resolve(index)?;
        let task = &mut self.tasks[pos];
        task.done = done;
        Ok(task)
    }

    /// Tasks whose description contains `keyword` (case-sensitive), in list order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches_keyword(keyword))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> TaskStore {
        TaskStore::from_tasks(vec![Task::todo("A"), Task::todo("B"), Task::todo("C")])
    }

    #[test]
    fn position_rejects_zero_negative_and_past_end() {
        assert_eq!(TaskIndex::one_based(1).position(3), Some(0));
        assert_eq!(TaskIndex::one_based(3).position(3), Some(2));
        assert_eq!(TaskIndex::one_based(0).position(3), None);
        assert_eq!(TaskIndex::one_based(-1).position(3), None);
        assert_eq!(TaskIndex::one_based(4).position(3), None);
        assert_eq!(TaskIndex::one_based(1).position(0), None);
    }

    #[test]
    fn delete_shifts_later_tasks() {
        let mut store = abc();
        let removed = store.delete(TaskIndex::one_based(2)).unwrap();
        assert_eq!(removed.description, "B");
        let names: Vec<_> = store.tasks().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn out_of_range_leaves_store_untouched() {
        let mut store = abc();
        let err = store.mark(TaskIndex::one_based(99)).unwrap_err();
        assert_eq!(err, TaskListError::OutOfRange { index: 99, len: 3 });
        assert!(store.tasks().iter().all(|t| !t.done));
        assert!(store.delete(TaskIndex::one_based(-1)).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn unmark_clears_flag() {
        let mut store = abc();
        store.mark(TaskIndex::one_based(1)).unwrap();
        assert!(store.tasks()[0].done);
        let t = store.unmark(TaskIndex::one_based(1)).unwrap();
        assert!(!t.done);
    }

    #[test]
    fn out_of_range_message_mentions_bounds() {
        let empty = TaskListError::OutOfRange { index: 1, len: 0 };
        assert!(empty.to_string().contains("empty"));
        let many = TaskListError::OutOfRange { index: 9, len: 4 };
        assert!(many.to_string().contains("between 1 and 4"));
    }
}
