// File: ./src/model/mod.rs
pub mod datetime;
pub mod display;
pub mod item;

pub use datetime::{
    DateTimeParseError, DateTimeParser, FixedDateParser, LocalDateParser, parse_datetime,
    parse_datetime_from,
};
pub use display::{DEFAULT_DATETIME_FORMAT, TaskDisplay};
pub use item::{Task, TaskKind};
