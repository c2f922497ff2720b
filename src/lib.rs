#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::uninlined_format_args
)]

pub mod config;
pub mod exchange;
pub mod session;
pub mod tui;

pub use config::Config;
