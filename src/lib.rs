pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod export;
pub mod logging;
pub mod view;
