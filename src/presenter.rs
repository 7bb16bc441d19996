// File: ./src/presenter.rs
// Renders task lists and status messages. No decisions are made here.
use crate::model::{DEFAULT_DATETIME_FORMAT, Task, TaskDisplay};
use chrono::NaiveDateTime;
use std::fmt;
use std::io::{self, Write};

pub trait Presenter {
    fn show_welcome(&mut self);
    fn show_goodbye(&mut self);
    fn show_task_list(&mut self, tasks: &[Task]);
    fn show_task_added(&mut self, added: &Task, tasks: &[Task]);
    fn show_task_deleted(&mut self, deleted: &Task, tasks: &[Task]);
    fn show_task_marked(&mut self, marked: &Task, tasks: &[Task]);
    fn show_task_unmarked(&mut self, unmarked: &Task, tasks: &[Task]);
    fn show_search_results(&mut self, keyword: &str, matches: &[&Task]);
    fn show_error(&mut self, message: &str);
}

/// Line-oriented presenter writing to any `io::Write` (stdout in the binary).
pub struct TerminalPresenter<W: Write> {
    out: W,
    datetime_format: String,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(datetime_format: &str) -> Self {
        Self::new(io::stdout(), datetime_format)
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// An empty or unparsable `datetime_format` falls back to the default.
    pub fn new(out: W, datetime_format: &str) -> Self {
        let datetime_format = if datetime_format.trim().is_empty() {
            DEFAULT_DATETIME_FORMAT.to_string()
        } else if !is_valid_format(datetime_format) {
            log::warn!(
                "Invalid datetime_format '{}', using '{}'",
                datetime_format,
                DEFAULT_DATETIME_FORMAT
            );
            DEFAULT_DATETIME_FORMAT.to_string()
        } else {
            datetime_format.to_string()
        };
        Self {
            out,
            datetime_format,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn numbered(&self, tasks: &[&Task]) -> Vec<String> {
        tasks
            .iter()
            .enumerate()
            .map(|(i, t)| {
                format!("{}. {}", i + 1, t.to_display_line(&self.datetime_format))
            })
            .collect()
    }

    fn confirmation(&mut self, headline: &str, task: &Task, tasks: &[Task]) {
        let mut lines = vec![
            headline.to_string(),
            format!("  {}", task.to_display_line(&self.datetime_format)),
            count_line(tasks.len()),
        ];
        lines.extend(self.numbered(&tasks.iter().collect::<Vec<_>>()));
        self.write_lines(&lines);
    }
}

/// Formats a sample timestamp; unknown specifiers and offset fields
/// (`%z`, `%Z`) fail on a `NaiveDateTime`.
fn is_valid_format(pattern: &str) -> bool {
    let sample = NaiveDateTime::default();
    let mut buf = String::new();
    fmt::Write::write_fmt(&mut buf, format_args!("{}", sample.format(pattern))).is_ok()
}

fn count_line(len: usize) -> String {
    match len {
        1 => "Now you have 1 task in the list.".to_string(),
        n => format!("Now you have {} tasks in the list.", n),
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_welcome(&mut self) {
        self.write_lines(&[
            "Hello! What can I do for you?".to_string(),
            "(type 'bye' to leave)".to_string(),
        ]);
    }

    fn show_goodbye(&mut self) {
        self.write_lines(&["Bye. Hope to see you again soon!".to_string()]);
    }

    fn show_task_list(&mut self, tasks: &[Task]) {
        if tasks.is_empty() {
            self.write_lines(&["Your task list is empty.".to_string()]);
            return;
        }
        let mut lines = vec!["Here are the tasks in your list:".to_string()];
        lines.extend(self.numbered(&tasks.iter().collect::<Vec<_>>()));
        self.write_lines(&lines);
    }

    fn show_task_added(&mut self, added: &Task, tasks: &[Task]) {
        self.confirmation("Got it. I've added this task:", added, tasks);
    }

    fn show_task_deleted(&mut self, deleted: &Task, tasks: &[Task]) {
        self.confirmation("Noted. I've removed this task:", deleted, tasks);
    }

    fn show_task_marked(&mut self, marked: &Task, tasks: &[Task]) {
        self.confirmation("Nice! I've marked this task as done:", marked, tasks);
    }

    fn show_task_unmarked(&mut self, unmarked: &Task, tasks: &[Task]) {
        self.confirmation(
            "OK, I've marked this task as not done yet:",
            unmarked,
            tasks,
        );
    }

    fn show_search_results(&mut self, keyword: &str, matches: &[&Task]) {
        if matches.is_empty() {
            self.write_lines(&[format!("No tasks match '{}'.", keyword)]);
            return;
        }
        let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
        lines.extend(self.numbered(matches));
        self.write_lines(&lines);
    }

    fn show_error(&mut self, message: &str) {
        self.write_lines(&[format!("OOPS!!! {}", message)]);
    }
}
