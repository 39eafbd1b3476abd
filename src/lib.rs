//! Progress and coverage reports for the Rabi Digital Crop Survey.
//!
//! - [`progress`] turns the Rabi plan sheet into per-state schedule metrics
//!   (targets vs. elapsed time vs. plots surveyed).
//! - [`survey`] counts district and village coverage in a daily survey
//!   summary sheet.
//!
//! Both read sheets through [`loader::load_table`].
pub mod cell;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod progress;
pub mod survey;
pub mod types;
pub mod util;
