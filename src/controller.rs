// File: src/controller.rs
//! Session controller: owns the task list for one interactive run.
//!
//! The controller checks for the exit command before a processor is ever
//! built, runs the processor, and persists the list after every successful
//! mutation when storage is attached.
use crate::command::Operation;
use crate::model::{DateTimeParser, LocalDateParser};
use crate::presenter::Presenter;
use crate::processor::{CommandProcessor, Outcome};
use crate::storage::LocalStorage;
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Continue,
    Exit,
}

pub struct Session {
    store: TaskStore,
    storage: Option<LocalStorage>,
    dates: Box<dyn DateTimeParser>,
}

impl Session {
    pub fn new(store: TaskStore, storage: Option<LocalStorage>) -> Self {
        Self {
            store,
            storage,
            dates: Box::new(LocalDateParser),
        }
    }

    /// Replaces the date/time parser (tests pin "today" this way).
    pub fn with_date_parser(mut self, dates: Box<dyn DateTimeParser>) -> Self {
        self.dates = dates;
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// Handles one input line.
    pub fn handle_line(&mut self, line: &str, presenter: &mut dyn Presenter) -> SessionState {
        if Operation::classify(line) == Operation::Exit {
            presenter.show_goodbye();
            return SessionState::Exit;
        }

        let processor = CommandProcessor::with_parser(line, self.dates.as_ref());
        let outcome = processor.process(&mut self.store, presenter);

        if outcome.as_ref().is_some_and(Outcome::is_mutation) {
            self.persist(presenter);
        }
        SessionState::Continue
    }

    fn persist(&self, presenter: &mut dyn Presenter) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(self.store.tasks()) {
            log::error!("Failed to save tasks: {:#}", e);
            presenter.show_error(&format!(
                "The change was applied but could not be saved: {}",
                e
            ));
        }
    }
}
