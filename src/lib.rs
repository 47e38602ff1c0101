pub mod config;
mod frontend;
pub mod widget_core;

pub use frontend::start_server;
