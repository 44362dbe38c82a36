//! Application state module

mod forms;
mod reveal;

pub use forms::*;
pub use reveal::*;
