//! CLI command handlers.

mod replay;
mod show_config;

pub use replay::run_replay;
pub use show_config::run_show_config;

#[cfg(test)]
pub use replay::{replay, Step};
