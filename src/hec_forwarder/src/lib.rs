pub mod config;
pub mod constants;
pub mod exporters;
pub mod handler;
pub mod logging;
pub mod record;
pub mod utils;
