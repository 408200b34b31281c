pub mod chat;
pub mod config;
pub mod quiz;
pub mod session;
pub mod tasks;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
