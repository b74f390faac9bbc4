//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["chorus.toml", ".chorus.toml"];
const ENV_PREFIX: &str = "CHORUS_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CHORUS_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chorus.toml` or `./.chorus.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/chorus/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/chorus/config.toml if set,
    /// otherwise falls back to ~/.config/chorus/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chorus").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./chorus.toml or ./.chorus.toml");
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
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("chorus"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "chorus.toml",
                r#"
[agents.agent2]
backend = "openrouter"
model = "mistral"

[orchestration]
history_limit = 4
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.agents["agent2"].model, "mistral");
            assert_eq!(config.agents["agent2"].backend, "openrouter");
            // Untouched roles keep their defaults
            assert_eq!(config.agents["agent1"].model, "openai/gpt-oss-120b");
            assert_eq!(config.orchestration.history_limit, 4);
            assert_eq!(config.orchestration.max_rounds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_and_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(".chorus.toml", "[classifier]\nmodel = \"project\"\n")?;
            jail.create_file("custom.toml", "[classifier]\nmodel = \"explicit\"\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.classifier.model, "explicit");

            jail.set_env("CHORUS_CLASSIFIER__MODEL", "from-env");
            jail.set_env("CHORUS_RETRY__BACKOFF_MS", "10");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.classifier.model, "from-env");
            assert_eq!(config.retry.backoff_ms, 10);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_is_error() {
        Jail::expect_with(|jail| {
            jail.create_file("chorus.toml", "[orchestration]\nmax_rounds = \"many\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
