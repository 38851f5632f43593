pub mod api;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;
pub mod ui;
pub mod views;
