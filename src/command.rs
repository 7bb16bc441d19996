// File: src/command.rs
//! Classification and argument extraction for one line of user input.
//!
//! Nothing in here touches the task list: a line is turned into a fully
//! validated [`Request`] first, so a command that fails validation can never
//! leave the list half-modified.
use crate::error::CommandError;
use crate::model::{DateTimeParser, Task};
use crate::store::TaskIndex;
use chrono::NaiveDateTime;
use strum::{EnumIter, IntoEnumIterator};

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Operation {
    List,
    AddTodo,
    AddDeadline,
    AddEvent,
    Delete,
    Mark,
    Unmark,
    Find,
    Exit,
    Unknown,
}

impl Operation {
    /// `bye` only counts as an exit when it is the whole (trimmed) line.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("bye") {
            return Operation::Exit;
        }
        let first = trimmed
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Operation::iter()
            .filter(|op| *op != Operation::Exit)
            .find(|op| op.keyword() == Some(first.as_str()))
            .unwrap_or(Operation::Unknown)
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Operation::List => Some("list"),
            Operation::AddTodo => Some("todo"),
            Operation::AddDeadline => Some("deadline"),
            Operation::AddEvent => Some("event"),
            Operation::Delete => Some("delete"),
            Operation::Mark => Some("mark"),
            Operation::Unmark => Some("unmark"),
            Operation::Find => Some("find"),
            Operation::Exit => Some("bye"),
            Operation::Unknown => None,
        }
    }

    pub fn usage(&self) -> Option<&'static str> {
        match self {
            Operation::List => Some("list"),
            Operation::AddTodo => Some("todo <description>"),
            Operation::AddDeadline => Some("deadline <description> /by <date/time>"),
            Operation::AddEvent => Some("event <description> /from <date/time> /to <date/time>"),
            Operation::Delete => Some("delete <number>"),
            Operation::Mark => Some("mark <number>"),
            Operation::Unmark => Some("unmark <number>"),
            Operation::Find => Some("find <keyword>"),
            Operation::Exit => Some("bye"),
            Operation::Unknown => None,
        }
    }
}

/// A validated, ready-to-apply command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Add(Task),
    Delete(TaskIndex),
    Mark(TaskIndex),
    Unmark(TaskIndex),
    Find(String),
    Exit,
}

/// One raw input line and the operation it was classified as.
#[derive(Debug, Clone)]
pub struct Command<'a> {
    raw: &'a str,
    operation: Operation,
}

impl<'a> Command<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            operation: Operation::classify(raw),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn is_exit(&self) -> bool {
        self.operation == Operation::Exit
    }

    /// Validates arguments and builds the request, parsing any date/time
    /// fragments with `dates`.
    pub fn to_request(&self, dates: &dyn DateTimeParser) -> Result<Request, CommandError> {
        match self.operation {
            Operation::List => Ok(Request::List),
            Operation::AddTodo => {
                let description = self.description_for("todo")?;
                Ok(Request::Add(Task::todo(description)))
            }
            Operation::AddDeadline => {
                let rest = self.description_for("deadline")?;
                let [description, by] = split_exactly(rest, BY_MARKER).ok_or_else(|| {
                    CommandError::malformed(
                        "Please give both a description and a deadline: deadline <description> /by <date/time>",
                    )
                })?;
                let description = non_empty_description(description, "deadline")?;
                let by = parse_fragment(by, "deadline", dates)?;
                Ok(Request::Add(Task::deadline(description, by)))
            }
            Operation::AddEvent => {
                let rest = self.description_for("event")?;
                let [description, span] = split_exactly(rest, FROM_MARKER).ok_or_else(|| {
                    CommandError::malformed(
                        "Please give a description, start and end: event <description> /from <date/time> /to <date/time>",
                    )
                })?;
                let [from, to] = split_exactly(span, TO_MARKER).ok_or_else(|| {
                    CommandError::malformed(
                        "Please give both a start and an end for the event: /from <date/time> /to <date/time>",
                    )
                })?;
                let description = non_empty_description(description, "event")?;
                let from = parse_fragment(from, "start", dates)?;
                let to = parse_fragment(to, "end", dates)?;
                Ok(Request::Add(Task::event(description, from, to)))
            }
            Operation::Delete => self.task_index().map(Request::Delete),
            Operation::Mark => self.task_index().map(Request::Mark),
            Operation::Unmark => self.task_index().map(Request::Unmark),
            Operation::Find => {
                let keyword = self.remainder();
                if keyword.is_empty() {
                    return Err(CommandError::EmptyKeyword);
                }
                Ok(Request::Find(keyword.to_string()))
            }
            Operation::Exit => Ok(Request::Exit),
            Operation::Unknown => Err(CommandError::UnknownCommand {
                input: self.raw.trim().to_string(),
            }),
        }
    }

    /// Everything after the keyword token, trimmed.
    fn remainder(&self) -> &'a str {
        let trimmed = self.raw.trim_start();
        let keyword_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        trimmed[keyword_len..].trim()
    }

    fn description_for(&self, operation: &'static str) -> Result<&'a str, CommandError> {
        non_empty_description(self.remainder(), operation)
    }

    /// Second whitespace token as a base-10 integer.
    pub fn task_index(&self) -> Result<TaskIndex, CommandError> {
        let token = self.raw.split_whitespace().nth(1);
        token
            .and_then(|t| t.parse::<i64>().ok())
            .map(TaskIndex::one_based)
            .ok_or_else(|| CommandError::InvalidIndex {
                token: token.map(str::to_string),
            })
    }
}

fn non_empty_description<'s>(
    text: &'s str,
    operation: &'static str,
) -> Result<&'s str, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        Err(CommandError::EmptyDescription { operation })
    } else {
        Ok(text)
    }
}

/// Literal substring split that must yield exactly two parts.
fn split_exactly<'s>(text: &'s str, marker: &str) -> Option<[&'s str; 2]> {
    let mut parts = text.split(marker);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Some([left.trim(), right.trim()]),
        _ => None,
    }
}

fn parse_fragment(
    fragment: &str,
    what: &str,
    dates: &dyn DateTimeParser,
) -> Result<NaiveDateTime, CommandError> {
    if fragment.is_empty() {
        return Err(CommandError::malformed(format!(
            "The {} date/time cannot be empty.",
            what
        )));
    }
    Ok(dates.parse(fragment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FixedDateParser, TaskKind};
    use chrono::NaiveDate;

    fn parser() -> FixedDateParser {
        FixedDateParser::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn request(line: &str) -> Result<Request, CommandError> {
        Command::new(line).to_request(&parser())
    }

    #[test]
    fn classification_is_case_insensitive_on_first_token() {
        assert_eq!(Operation::classify("LIST"), Operation::List);
        assert_eq!(Operation::classify("  Todo read"), Operation::AddTodo);
        assert_eq!(Operation::classify("DeadLine x /by today"), Operation::AddDeadline);
        assert_eq!(Operation::classify("unmark 1"), Operation::Unmark);
        assert_eq!(Operation::classify(""), Operation::Unknown);
        assert_eq!(Operation::classify("   "), Operation::Unknown);
        assert_eq!(Operation::classify("todos"), Operation::Unknown);
    }

    #[test]
    fn bye_must_be_the_whole_line() {
        assert_eq!(Operation::classify("bye"), Operation::Exit);
        assert_eq!(Operation::classify("  BYE \t"), Operation::Exit);
        assert_eq!(Operation::classify("bye now"), Operation::Unknown);
        assert!(!Command::new("bye now").is_exit());
    }

    #[test]
    fn todo_description_is_trimmed() {
        assert_eq!(
            request("todo    read book  "),
            Ok(Request::Add(Task::todo("read book")))
        );
        assert_eq!(
            request("todo   "),
            Err(CommandError::EmptyDescription { operation: "todo" })
        );
    }

    #[test]
    fn deadline_split_on_by() {
        let Ok(Request::Add(task)) = request("deadline return book /by 2024-12-02 1800") else {
            panic!("expected a deadline");
        };
        assert_eq!(task.description, "return book");
        let by = NaiveDate::from_ymd_opt(2024, 12, 2)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(task.kind, TaskKind::Deadline { by });
    }

    #[test]
    fn deadline_marker_count_must_be_exact() {
        assert!(matches!(
            request("deadline return book"),
            Err(CommandError::MalformedArguments(_))
        ));
        assert!(matches!(
            request("deadline a /by today /by tomorrow"),
            Err(CommandError::MalformedArguments(_))
        ));
        assert!(matches!(
            request("deadline a /by   "),
            Err(CommandError::MalformedArguments(_))
        ));
        assert_eq!(
            request("deadline /by today"),
            Err(CommandError::EmptyDescription {
                operation: "deadline"
            })
        );
        assert_eq!(
            request("deadline"),
            Err(CommandError::EmptyDescription {
                operation: "deadline"
            })
        );
    }

    #[test]
    fn deadline_with_bad_date_is_a_date_error() {
        assert!(matches!(
            request("deadline a /by someday"),
            Err(CommandError::DateTime(_))
        ));
    }

    #[test]
    fn event_splits_from_then_to() {
        let Ok(Request::Add(task)) = request("event meetup /from today 1800 /to today 2000") else {
            panic!("expected an event");
        };
        assert_eq!(task.description, "meetup");
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(
            task.kind,
            TaskKind::Event {
                from: day.and_hms_opt(18, 0, 0).unwrap(),
                to: day.and_hms_opt(20, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn event_with_reordered_markers_is_malformed() {
        for line in [
            "event meetup /to today /from today",
            "event meetup /from today",
            "event meetup",
            "event meetup /from a /from b /to c",
            "event meetup /from a /to b /to c",
        ] {
            assert!(
                matches!(request(line), Err(CommandError::MalformedArguments(_))),
                "{line}"
            );
        }
    }

    #[test]
    fn index_extraction() {
        assert_eq!(request("mark 2"), Ok(Request::Mark(TaskIndex::one_based(2))));
        assert_eq!(
            request("delete   -1"),
            Ok(Request::Delete(TaskIndex::one_based(-1)))
        );
        assert_eq!(
            request("unmark two"),
            Err(CommandError::InvalidIndex {
                token: Some("two".to_string())
            })
        );
        assert_eq!(
            request("delete"),
            Err(CommandError::InvalidIndex { token: None })
        );
    }

    #[test]
    fn find_requires_keyword() {
        assert_eq!(request("find  cat "), Ok(Request::Find("cat".to_string())));
        assert_eq!(request("find"), Err(CommandError::EmptyKeyword));
    }

    #[test]
    fn unknown_keeps_input() {
        assert_eq!(
            request(" blah blah "),
            Err(CommandError::UnknownCommand {
                input: "blah blah".to_string()
            })
        );
    }
}
