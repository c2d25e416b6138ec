use crate::descriptions::to_pretty_json;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Given the base configuration folder path, returns
/// the path of the configuration JSON file.
fn get_json_path(config_path: &Path) -> PathBuf {
    config_path.join("config.json")
}

/// Given the base configuration folder path, returns
/// the default path of the templates folder.
fn get_default_template_dir(config_path: &Path) -> PathBuf {
    config_path.join("templates")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub template_dir: PathBuf,
}

impl Config {
    fn load_config(path: &Path) -> Result<Option<Config>, LoadConfigError> {
        let json_path = get_json_path(path);
        if !json_path.exists() {
            return Ok(None);
        }
        if !json_path.is_file() {
            return Err(LoadConfigError::NotAFile(
                json_path.to_string_lossy().to_string(),
            ));
        }
        let json_file = match fs::File::open(json_path.clone()) {
            Ok(f) => f,
            Err(x) => return Err(LoadConfigError::FileError(x)),
        };
        let reader = BufReader::new(json_file);
        serde_json::from_reader::<_, Config>(reader)
            .map_err(|e| {
                LoadConfigError::BadDeserialization(e, json_path.to_string_lossy().to_string())
            })
            .map(|config| Some(config.expanded()))
    }

    /// Expands a leading `~` in the template directory, so the file
    /// can be edited by hand.
    fn expanded(self) -> Config {
        let raw = self.template_dir.to_string_lossy().to_string();
        Config {
            template_dir: PathBuf::from(shellexpand::tilde(&raw).to_string()),
        }
    }

    pub fn write_config(&self, config_path: &Path) -> Result<(), WriteConfigError> {
        let json_path = get_json_path(config_path);
        if json_path.exists() && !json_path.is_file() {
            return Err(WriteConfigError::NotAFile(
                json_path.to_string_lossy().to_string(),
            ));
        }
        let json = to_pretty_json(self).map_err(|e| {
            WriteConfigError::BadSerialization(e, json_path.to_string_lossy().to_string())
        })?;
        fs::write(&json_path, json).map_err(WriteConfigError::FileError)
    }

    /// Loads the configuration stored in `config_path`. On first run,
    /// when there is no configuration file yet, the template directory
    /// defaults to `templates` inside `config_path`; it is created and
    /// the configuration is written.
    pub fn load_or_init(config_path: &Path) -> Result<Config, ConfigError> {
        if let Some(config) = Config::load_config(config_path)? {
            debug!(
                "Loaded configuration from {}",
                get_json_path(config_path).display()
            );
            return Ok(config);
        }

        let config = Config {
            template_dir: get_default_template_dir(config_path),
        };
        fs::create_dir_all(&config.template_dir).map_err(|e| {
            WriteConfigError::TemplateDirError(e, config.template_dir.to_string_lossy().to_string())
        })?;
        config.write_config(config_path)?;
        info!(
            "Initialised configuration in {}, templates go in {}",
            config_path.display(),
            config.template_dir.display()
        );
        Ok(config)
    }
}

#[derive(Debug)]
pub enum LoadConfigError {
    NotAFile(String),
    FileError(std::io::Error),
    BadDeserialization(serde_json::Error, String),
}

impl Display for LoadConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadConfigError::NotAFile(path) => write!(
                f,
                "Configuration JSON path ({}) exists, but is not a file!",
                path
            ),
            LoadConfigError::FileError(e) => {
                write!(
                    f,
                    "Error opening the configuration JSON file for reading: {}",
                    e
                )
            }
            LoadConfigError::BadDeserialization(e, path) => {
                write!(
                    f,
                    "Error parsing the configuration JSON file: {}\n\
                    You can attempt to fix the file manually, or delete it \
                    (the template directory will be reset to its default).\n\
                    The configuration file can be found in '{}'",
                    e, path
                )
            }
        }
    }
}

#[derive(Debug)]
pub enum WriteConfigError {
    NotAFile(String),
    FileError(std::io::Error),
    BadSerialization(serde_json::Error, String),
    TemplateDirError(std::io::Error, String),
}

impl Display for WriteConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteConfigError::NotAFile(path) => write!(
                f,
                "Configuration JSON path ('{}') exists, but is not a file!",
                path
            ),
            WriteConfigError::FileError(e) => write!(
                f,
                "Error opening the configuration JSON file for writing: '{}'",
                e
            ),
            WriteConfigError::BadSerialization(e, path) => {
                write!(
                    f,
                    "Error writing the configuration to file: '{}'\n\
                    It is possible that your configuration file has become \
                    corrupted. You can attempt to fix the file manually, or \
                    delete it.\n\
                    The configuration file can be found in '{}'.",
                    e, path
                )
            }
            WriteConfigError::TemplateDirError(e, path) => write!(
                f,
                "Could not create the template directory ('{}'): '{}'",
                path, e
            ),
        }
    }
}

/// Either way setting up the configuration can fail.
#[derive(Debug)]
pub enum ConfigError {
    Load(LoadConfigError),
    Write(WriteConfigError),
}

impl From<LoadConfigError> for ConfigError {
    fn from(err: LoadConfigError) -> Self {
        ConfigError::Load(err)
    }
}

impl From<WriteConfigError> for ConfigError {
    fn from(err: WriteConfigError) -> Self {
        ConfigError::Write(err)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(e) => Display::fmt(e, f),
            ConfigError::Write(e) => Display::fmt(e, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_run_creates_config_and_template_dir() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_init(tmp.path()).unwrap();

        assert_eq!(config.template_dir, tmp.path().join("templates"));
        assert!(config.template_dir.is_dir());

        let written = fs::read_to_string(tmp.path().join("config.json")).unwrap();
        assert!(written.starts_with("{\n    \"template_dir\": "));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn existing_config_is_kept() {
        let tmp = TempDir::new().unwrap();
        let elsewhere = tmp.path().join("elsewhere");
        Config {
            template_dir: elsewhere.clone(),
        }
        .write_config(tmp.path())
        .unwrap();

        let config = Config::load_or_init(tmp.path()).unwrap();
        assert_eq!(config.template_dir, elsewhere);
        assert!(!tmp.path().join("templates").exists());
    }

    #[test]
    fn tilde_is_expanded() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.json"),
            "{\"template_dir\": \"~/my-templates\"}",
        )
        .unwrap();

        let config = Config::load_or_init(tmp.path()).unwrap();
        assert!(!config.template_dir.starts_with("~"));
        assert!(config.template_dir.ends_with("my-templates"));
    }

    #[test]
    fn bad_json_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.json"), "template_dir = nope").unwrap();

        match Config::load_or_init(tmp.path()) {
            Err(ConfigError::Load(LoadConfigError::BadDeserialization(_, path))) => {
                assert!(path.ends_with("config.json"))
            }
            _ => panic!("expected a deserialization error"),
        }
    }
}
