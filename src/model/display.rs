// File: ./src/model/display.rs
use crate::model::item::{Task, TaskKind};

pub const DEFAULT_DATETIME_FORMAT: &str = "%b %d %Y, %H:%M";

pub trait TaskDisplay {
    fn type_symbol(&self) -> &'static str;
    fn checkbox_symbol(&self) -> &'static str;
    /// One-line rendering, e.g. `[D][X] submit report (by: Dec 02 2024, 18:00)`.
    fn to_display_line(&self, datetime_format: &str) -> String;
}

impl TaskDisplay for Task {
    fn type_symbol(&self) -> &'static str {
        match self.kind {
            TaskKind::Todo => "[T]",
            TaskKind::Deadline { .. } => "[D]",
            TaskKind::Event { .. } => "[E]",
        }
    }

    fn checkbox_symbol(&self) -> &'static str {
        if self.done { "[X]" } else { "[ ]" }
    }

    fn to_display_line(&self, datetime_format: &str) -> String {
        let mut s = format!(
            "{}{} {}",
            self.type_symbol(),
            self.checkbox_symbol(),
            self.description
        );
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => {
                s.push_str(&format!(" (by: {})", by.format(datetime_format)));
            }
            TaskKind::Event { from, to } => {
                s.push_str(&format!(
                    " (from: {} to: {})",
                    from.format(datetime_format),
                    to.format(datetime_format)
                ));
            }
        }
        s
    }
}
