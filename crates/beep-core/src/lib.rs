#![cfg_attr(not(test), no_std)]

pub mod buzzer;
pub mod config;
pub mod confusion;
pub mod consts;
pub mod engine;
pub mod error;
pub mod gfx;
pub mod input;
pub mod motion;
pub mod output;
pub mod rings;
pub mod scenes;
pub mod sequencer;
pub mod time;

pub use config::BeepConfig;
pub use error::ConfigError;
pub use time::{Instant, TimeSource};
