pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod identity;
