pub mod app;
pub mod bionic;
pub mod cli;
pub mod compose;
pub mod config;
pub mod markdown;
pub mod paths;
pub mod settings;
