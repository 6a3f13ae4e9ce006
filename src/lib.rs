//! Paginated golem guide: a catalog of golem entries laid out as a two-page
//! book, with a scrollable contents index, drawn in the terminal.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod book;
pub mod catalog;
pub mod config;
pub mod event;
pub mod logging;
pub mod ui;
