//! Leaf delta 13C analysis for CRDS isotope analyzer exports.
//!
//! A [`state::Session`] loads an export, calibrates it against the leading
//! glucose standards, looks species up in the leaf 13C reference table, and
//! feeds grouped corrected values to the statistics engine and bar chart.
//! [`workflow::Workflow`] drives those steps through any
//! [`ui::prompt::Prompter`].

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod stats;
pub mod ui;
pub mod workflow;

pub use error::{Error, Result};
