pub mod action;
pub mod config;
pub mod running;
pub mod scoring;
pub mod style;

pub use crate::config::Config;
