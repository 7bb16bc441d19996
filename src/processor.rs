// File: src/processor.rs
//! Applies one command to the task list and reports the result.
//!
//! A processor is built for exactly one input line. Validation happens before
//! any mutation (see [`Command::to_request`]), and every failure is turned into
//! a single `Presenter::show_error` call: nothing escapes [`CommandProcessor::process`].
use crate::command::{Command, Operation, Request};
use crate::error::CommandError;
use crate::model::{DateTimeParser, LocalDateParser, Task};
use crate::presenter::Presenter;
use crate::store::TaskStore;

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed,
    Added(Task),
    Deleted(Task),
    Marked(Task),
    Unmarked(Task),
    Found { keyword: String, matches: Vec<Task> },
    Exit,
}

impl Outcome {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Outcome::Added(_) | Outcome::Deleted(_) | Outcome::Marked(_) | Outcome::Unmarked(_)
        )
    }
}

pub struct CommandProcessor<'a> {
    command: Command<'a>,
    dates: &'a dyn DateTimeParser,
}

impl<'a> CommandProcessor<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self::with_parser(raw, &LocalDateParser)
    }

    pub fn with_parser(raw: &'a str, dates: &'a dyn DateTimeParser) -> Self {
        Self {
            command: Command::new(raw),
            dates,
        }
    }

    pub fn operation(&self) -> Operation {
        self.command.operation()
    }

    pub fn is_exit(&self) -> bool {
        self.command.is_exit()
    }

    /// Applies the command and routes the result to `presenter`.
    ///
    /// Exit commands are a no-op: the caller is expected to have checked
    /// [`CommandProcessor::is_exit`] and ended the session already.
    pub fn process(
        &self,
        tasks: &mut TaskStore,
        presenter: &mut dyn Presenter,
    ) -> Option<Outcome> {
        match self.execute(tasks) {
            Ok(outcome) => {
                render(&outcome, tasks, presenter);
                Some(outcome)
            }
            Err(e) => {
                log::debug!(
                    "Rejected {:?} command '{}': {:?}",
                    self.command.operation(),
                    self.command.raw(),
                    e
                );
                presenter.show_error(&e.to_string());
                None
            }
        }
    }

    /// Applies the command without presenting anything.
    pub fn execute(&self, tasks: &mut TaskStore) -> Result<Outcome, CommandError> {
        let request = self.command.to_request(self.dates)?;
        let outcome = match request {
            Request::List => Outcome::Listed,
            Request::Add(task) => Outcome::Added(tasks.add(task).clone()),
            Request::Delete(index) => Outcome::Deleted(tasks.delete(index)?),
            Request::Mark(index) => Outcome::Marked(tasks.mark(index)?.clone()),
            Request::Unmark(index) => Outcome::Unmarked(tasks.unmark(index)?.clone()),
            Request::Find(keyword) => {
                let matches = tasks.find(&keyword).into_iter().cloned().collect();
                Outcome::Found { keyword, matches }
            }
            Request::Exit => Outcome::Exit,
        };
        match &outcome {
            Outcome::Added(task) => log::info!(
                "Added {} '{}'; {} task(s) in list",
                task.kind.label(),
                task.description,
                tasks.len()
            ),
            o if o.is_mutation() => log::info!(
                "Applied {:?}; {} task(s) in list",
                self.command.operation(),
                tasks.len()
            ),
            _ => {}
        }
        Ok(outcome)
    }
}

fn render(outcome: &Outcome, tasks: &TaskStore, presenter: &mut dyn Presenter) {
    match outcome {
        Outcome::Listed => presenter.show_task_list(tasks.tasks()),
        Outcome::Added(t) => presenter.show_task_added(t, tasks.tasks()),
        Outcome::Deleted(t) => presenter.show_task_deleted(t, tasks.tasks()),
        Outcome::Marked(t) => presenter.show_task_marked(t, tasks.tasks()),
        Outcome::Unmarked(t) => presenter.show_task_unmarked(t, tasks.tasks()),
        Outcome::Found { keyword, matches } => {
            let refs: Vec<&Task> = matches.iter().collect();
            presenter.show_search_results(keyword, &refs);
        }
        Outcome::Exit => {}
    }
}
