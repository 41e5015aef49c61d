//! Turn progress display

pub mod reporter;
