//! Template keys.
//!
//! Prompts are assembled from two static fragments: one picked by the
//! learner's [`LevelCode`] and one picked by the interaction [`RoleCode`].

pub mod level;
pub mod role;

pub use level::LevelCode;
pub use role::RoleCode;
