pub mod app;
pub mod command;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod logging;
pub mod page;
pub mod router;
pub mod site;
pub mod ui;
