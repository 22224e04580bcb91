//! CLI library components for the Helmert encoder.

pub mod cli;
pub mod commands;
pub mod io;
pub mod logging;
pub mod summary;
