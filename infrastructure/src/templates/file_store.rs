//! Filesystem-backed template store

use lingua_application::ports::template_store::{TemplateError, TemplateKind, TemplateStore};
use lingua_domain::{LevelCode, RoleCode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads level and role templates from two directories.
///
/// Files are read on every lookup, so edits apply to the next turn.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    levels_dir: PathBuf,
    roles_dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(levels_dir: impl Into<PathBuf>, roles_dir: impl Into<PathBuf>) -> Self {
        Self {
            levels_dir: levels_dir.into(),
            roles_dir: roles_dir.into(),
        }
    }

    pub fn levels_dir(&self) -> &Path {
        &self.levels_dir
    }

    pub fn roles_dir(&self) -> &Path {
        &self.roles_dir
    }

    /// Template files that should exist but do not.
    pub fn missing_files(&self) -> Vec<PathBuf> {
        let levels = LevelCode::all()
            .into_iter()
            .map(|level| self.levels_dir.join(level.file_name()));
        let roles = [RoleCode::Pro, RoleCode::ProVision]
            .into_iter()
            .map(|role| self.roles_dir.join(role.file_name()));
        levels.chain(roles).filter(|path| !path.is_file()).collect()
    }

    fn read(kind: TemplateKind, path: PathBuf) -> Result<String, TemplateError> {
        debug!("Reading {} template {}", kind, path.display());
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TemplateError::Missing {
                kind,
                path: path.display().to_string(),
            },
            _ => TemplateError::Unreadable {
                kind,
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })
    }
}

impl TemplateStore for FileTemplateStore {
    fn level_template(&self, level: LevelCode) -> Result<String, TemplateError> {
        Self::read(TemplateKind::Level, self.levels_dir.join(level.file_name()))
    }

    fn role_template(&self, role: RoleCode) -> Result<String, TemplateError> {
        Self::read(TemplateKind::Role, self.roles_dir.join(role.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &Path) -> FileTemplateStore {
        let levels = dir.join("levels");
        let roles = dir.join("rol-model");
        fs::create_dir_all(&levels).unwrap();
        fs::create_dir_all(&roles).unwrap();
        FileTemplateStore::new(levels, roles)
    }

    #[test]
    fn test_reads_full_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.levels_dir().join("B1.txt"), "Speak simply.\nUse past tense.\n").unwrap();
        fs::write(store.roles_dir().join("pro.txt"), "You are a tutor. ").unwrap();

        assert_eq!(
            store.level_template(LevelCode::B1).unwrap(),
            "Speak simply.\nUse past tense.\n"
        );
        assert_eq!(
            store.role_template(RoleCode::Pro).unwrap(),
            "You are a tutor. "
        );
    }

    #[test]
    fn test_missing_file_reports_kind_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let err = store.role_template(RoleCode::ProVision).unwrap_err();
        assert_eq!(err.kind(), TemplateKind::Role);
        match err {
            TemplateError::Missing { path, .. } => assert!(path.ends_with("pro_vision.txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_edits_apply_to_next_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let path = store.levels_dir().join("A1.txt");

        fs::write(&path, "first").unwrap();
        assert_eq!(store.level_template(LevelCode::A1).unwrap(), "first");
        fs::write(&path, "second").unwrap();
        assert_eq!(store.level_template(LevelCode::A1).unwrap(), "second");
    }

    #[test]
    fn test_directory_in_place_of_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir(store.levels_dir().join("C2.txt")).unwrap();

        let err = store.level_template(LevelCode::C2).unwrap_err();
        assert!(matches!(err, TemplateError::Unreadable { .. }));
    }

    #[test]
    fn test_missing_files_lists_all_absent_templates() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.levels_dir().join("A1.txt"), "x").unwrap();
        fs::write(store.roles_dir().join("pro.txt"), "x").unwrap();

        let missing = store.missing_files();
        assert_eq!(missing.len(), 6);
        assert!(missing.iter().any(|p| p.ends_with("pro_vision.txt")));
        assert!(!missing.iter().any(|p| p.ends_with("A1.txt")));
    }
}
