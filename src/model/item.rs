// File: ./src/model/item.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// What kind of task this is, together with the timestamps that kind carries.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskKind {
    Todo,
    Deadline {
        by: NaiveDateTime,
    },
    Event {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline { .. } => "deadline",
            TaskKind::Event { .. } => "event",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, by: NaiveDateTime) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by },
        }
    }

    pub fn event(description: impl Into<String>, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event { from, to },
        }
    }

    /// Case-sensitive substring match on the description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn new_tasks_start_not_done() {
        assert!(!Task::todo("read").done);
        assert!(!Task::deadline("file taxes", at(2025, 4, 15, 23, 59)).done);
        assert!(!Task::event("conf", at(2025, 6, 1, 9, 0), at(2025, 6, 1, 17, 0)).done);
    }

    #[test]
    fn labels_name_the_command() {
        let by = at(2025, 4, 15, 23, 59);
        assert_eq!(Task::todo("a").kind.label(), "todo");
        assert_eq!(Task::deadline("a", by).kind.label(), "deadline");
        assert_eq!(Task::event("a", by, by).kind.label(), "event");
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let t = Task::todo("Buy catfood");
        assert!(t.matches_keyword("cat"));
        assert!(!t.matches_keyword("Cat"));
    }

    #[test]
    fn serialized_form_is_flat_and_tagged() {
        let t = Task::deadline("report", at(2024, 12, 2, 18, 0));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "Deadline");
        assert_eq!(json["description"], "report");
        assert_eq!(json["done"], false);
        assert!(json.get("by").is_some());
    }
}
