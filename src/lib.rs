pub mod config;
pub mod console;
pub mod layout;
pub mod log_init;
pub mod misc;
pub mod parchis;
pub mod snapshot;
