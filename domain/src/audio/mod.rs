//! Audio file naming.
//!
//! Synthesized replies are stored as `audios/YYYY_MM_DD_HH_mm_SS.mp3`.
//! There is no collision detection: two turns in the same second share a path.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Default directory for synthesized audio
pub const AUDIO_DIR: &str = "audios";

const FILE_NAME_FORMAT: &str = "%Y_%m_%d_%H_%M_%S.mp3";

/// Audio path under the default [`AUDIO_DIR`], using `/` as separator.
pub fn next_audio_path(now: &NaiveDateTime) -> String {
    format!("{}/{}", AUDIO_DIR, now.format(FILE_NAME_FORMAT))
}

/// Audio path under a configurable directory.
pub fn audio_path_in(dir: &Path, now: &NaiveDateTime) -> PathBuf {
    dir.join(now.format(FILE_NAME_FORMAT).to_string())
}
