#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod streak;
pub mod time;

pub use time::Clock;
