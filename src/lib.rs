// Crate root library declaration and module exports.
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod presenter;
pub mod processor;
pub mod storage;
pub mod store;
