//! Front-end pieces: operator prompts and the chart drawing code.

pub mod plot;
pub mod prompt;
