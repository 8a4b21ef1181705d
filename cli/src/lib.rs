//! Terminal shell for the task manager.
//!
//! Wires `task-core`'s controller to a ureq transport and renders its view as
//! plain text, one command per line.

pub mod command;
pub mod config;
pub mod shell;
pub mod transport;
