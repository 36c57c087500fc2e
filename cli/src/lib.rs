//! Shared pieces of the cointools binaries: the column-aligned
//! printer and the optional user settings file.

pub mod output;
pub mod settings;
