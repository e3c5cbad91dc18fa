pub mod app_config;
pub mod cli;
pub mod error;
pub mod file_config;
pub mod parse;
