//! clipask: clipboard and selection questions for a chat model.

pub mod cli;
pub mod commands;
pub mod logging;
