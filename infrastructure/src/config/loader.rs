//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "lingua-chat";
const PROJECT_FILES: [&str; 2] = ["lingua.toml", ".lingua.toml"];
const ENV_PREFIX: &str = "LINGUA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LINGUA_`-prefixed environment variables (`LINGUA_CHAT__WRAP_WIDTH=80`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lingua.toml` or `./.lingua.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/lingua-chat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::figment(global.as_deref(), project.as_deref(), config_path.map(|p| p.as_path()))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        Self::file_layers(global, project, explicit).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Defaults and config files, without the environment
    fn file_layers(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/lingua-chat/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let env_vars: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_vars.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", env_vars.join(", "));
        }

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Config:  {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./lingua.toml or ./.lingua.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.gemini.text_model, "gemini-pro");
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("lingua-chat"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("lingua.toml");
        fs::write(&global, "[chat]\nwrap_width = 60\nanalysis = false\n").unwrap();
        fs::write(&project, "[chat]\nwrap_width = 90\n").unwrap();

        let config: FileConfig = ConfigLoader::file_layers(Some(&global), Some(&project), None)
            .extract()
            .unwrap();

        assert_eq!(config.chat.wrap_width, 90);
        assert!(!config.chat.analysis);
        assert_eq!(config.paths.levels_dir, "levels");
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("lingua.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[gemini]\ntext_model = \"project-model\"\n").unwrap();
        fs::write(&explicit, "[gemini]\ntext_model = \"explicit-model\"\n").unwrap();

        let config: FileConfig = ConfigLoader::file_layers(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.gemini.text_model, "explicit-model");
    }

    #[test]
    fn test_env_overrides_every_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[chat]\nwrap_width = 120\nanalysis = false\n")?;
            jail.set_env("LINGUA_CHAT__WRAP_WIDTH", "80");
            jail.set_env("LINGUA_GEMINI__TEXT_MODEL", "gemini-env");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("custom.toml"))).extract()?;

            assert_eq!(config.chat.wrap_width, 80);
            assert_eq!(config.gemini.text_model, "gemini-env");
            // Keys not set in the environment keep the file value
            assert!(!config.chat.analysis);
            Ok(())
        });
    }

    #[test]
    fn test_unprefixed_env_is_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CHAT__WRAP_WIDTH", "80");

            let config: FileConfig = ConfigLoader::figment(None, None, None).extract()?;

            assert_eq!(config.chat.wrap_width, FileConfig::default().chat.wrap_width);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[chat]\nwrap_width = \"wide\"\n").unwrap();

        let result: Result<FileConfig, _> =
            ConfigLoader::file_layers(None, None, Some(&explicit)).extract();
        assert!(result.is_err());
    }
}
