//! Configuration management for HikeLite
//!
//! - **settings**: user preferences (display unit, log level) stored as JSON
//!   in the platform config dir

pub mod settings;

pub use settings::Settings;
