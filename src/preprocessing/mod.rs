//! Image preprocessing for OCR
//!
//! A fixed filter chain that turns a screenshot crop into a clean binary
//! image before recognition.

pub mod pipeline;
pub mod steps;

pub use pipeline::run;
