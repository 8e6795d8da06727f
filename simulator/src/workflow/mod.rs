pub mod config;
pub mod mailbox;
pub mod rate;
pub mod runner;
