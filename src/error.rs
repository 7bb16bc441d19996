//! User-correctable command errors.
//!
//! Every variant is recoverable: it is shown to the user once and the task
//! list is left exactly as it was before the command.

use crate::model::DateTimeParseError;
use crate::store::TaskListError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `todo`, `deadline` or `event` without a description.
    #[error("The description of a {operation} cannot be empty.")]
    EmptyDescription { operation: &'static str },

    /// A `/by`, `/from` or `/to` marker is missing or repeated.
    #[error("{0}")]
    MalformedArguments(String),

    /// Passed through verbatim from the date/time parser.
    #[error(transparent)]
    DateTime(#[from] DateTimeParseError),

    #[error("Please provide a keyword to search for.")]
    EmptyKeyword,

    /// Missing (`token: None`) or non-numeric task number.
    #[error("{}", invalid_index_message(.token))]
    InvalidIndex { token: Option<String> },

    #[error(transparent)]
    OutOfRangeIndex(#[from] TaskListError),

    #[error("I'm sorry, but I don't know what '{input}' means.")]
    UnknownCommand { input: String },
}

impl CommandError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedArguments(reason.into())
    }
}

fn invalid_index_message(token: &Option<String>) -> String {
    match token {
        Some(t) => format!("'{}' is not a task number. Usage: <delete|mark|unmark> <number>", t),
        None => "Which task? Usage: <delete|mark|unmark> <number>".to_string(),
    }
}
