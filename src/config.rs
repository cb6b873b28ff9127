//! Startup configuration.
//!
//! Read once from a TOML file. Every field has a default, so an empty file
//! (or no file at all) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_ENV_VAR: &str = "TWINCADE_CONFIG";
const CONFIG_FILE_NAME: &str = "twincade.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlappyConfig {
    pub fps: u32,
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnakeConfig {
    /// Frame rate at score 0; the ramp adds to it.
    pub base_fps: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self { base_fps: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub volume: f32,
    /// Ring the terminal bell on game over.
    pub bell: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { volume: 0.8, bell: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory of sprite files. Built-in sprites are used when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: std::env::temp_dir().join("twincade.log"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    pub flappy: FlappyConfig,
    pub snake: SnakeConfig,
    pub audio: AudioConfig,
    pub assets: AssetsConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load from `$TWINCADE_CONFIG`, else `twincade.toml` next to the
    /// executable. Only the implicit file may be absent.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(CONFIG_FILE_NAME);
            }
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flappy.fps == 0 || self.snake.base_fps == 0 {
            return Err(ConfigError::Invalid("frame rates must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "audio.volume {} is outside 0.0..=1.0",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.flappy.fps, 60);
        assert_eq!(config.snake.base_fps, 15);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            seed = 7
            [snake]
            base_fps = 20
            [assets]
            dir = "sprites"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.snake.base_fps, 20);
        assert_eq!(config.flappy.fps, 60);
        assert_eq!(config.assets.dir, Some(PathBuf::from("sprites")));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("[flappy]\nspeed = 3\n").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.audio.volume = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.audio.volume = 0.5;
        config.flappy.fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = std::env::temp_dir().join("twincade-missing-config.toml");
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let path = std::env::temp_dir().join(format!("twincade-bad-{}.toml", std::process::id()));
        fs::write(&path, "[flappy\nfps = ").unwrap();
        let result = Config::from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
