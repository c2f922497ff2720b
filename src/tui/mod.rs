//! Full-screen chat surface: sample questions, the transcript, an error
//! line, and a single-line input field.
//!
//! The event loop multiplexes terminal key events with exchange completions
//! delivered over an mpsc channel, so typing stays live while a request is
//! in flight.

mod app;
mod ui;

pub use app::run;
