pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod scanner;
pub mod workflow;
