//! Chat session domain.
//!
//! - [`profile::SessionProfile`]: learner name and level, validated at join
//! - [`profile::SessionState`]: explicit per-session state

pub mod profile;
