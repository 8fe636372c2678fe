use crate::{error::Error, scene::SceneFileType};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, warn};

/// Locations of everything projman keeps on disk.
///
/// All services are built from one of these instead of reading global paths,
/// so tests and alternative front ends can point them anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paths {
    data_dir: PathBuf,
}

impl Paths {
    /// Wraps `data_dir` without touching the disk.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Paths {
            data_dir: data_dir.into(),
        }
    }

    /// Wraps `data_dir`, creating it first if it does not exist.
    pub fn create(data_dir: impl Into<PathBuf>) -> crate::Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| Error::io(&data_dir, e))?;
        }
        Ok(Paths { data_dir })
    }

    /// `(user data directory)/projman`, as given by the `dirs` crate.
    /// `None` on platforms where `dirs` knows no data directory.
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("projman"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn project_list_file(&self) -> PathBuf {
        self.data_dir.join("projects.projlist")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.data_dir.join("templates")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}

/// User settings persisted between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    version: String,
    /// Keys of the scene file types selected in the last session.
    #[serde(default)]
    pub scene_filters: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: crate::VERSION.to_string(),
            scene_filters: vec![],
        }
    }
}

impl Config {
    fn load_config(json_path: &Path) -> Result<Option<Config>, LoadConfigError> {
        if !json_path.exists() {
            return Ok(None);
        }
        if !json_path.is_file() {
            return Err(LoadConfigError::NotAFile(
                json_path.to_string_lossy().to_string(),
            ));
        }
        let json_file = fs::File::open(json_path).map_err(LoadConfigError::FileError)?;
        let reader = BufReader::new(json_file);
        serde_json::from_reader::<_, Config>(reader)
            .map_err(|e| {
                LoadConfigError::BadDeserialization(e, json_path.to_string_lossy().to_string())
            })
            .map(Some)
    }

    /// Resolves `scene_filters` into file types. Unknown keys (e.g. from a
    /// hand-edited file) are skipped.
    pub fn scene_types(&self) -> Vec<&'static SceneFileType> {
        self.scene_filters
            .iter()
            .filter_map(|key| {
                let found = SceneFileType::lookup(key);
                if found.is_none() {
                    warn!("ignoring unknown scene filter '{}'", key);
                }
                found
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("Configuration JSON path ({0}) exists, but is not a file!")]
    NotAFile(String),
    #[error("Error opening the configuration JSON file for reading: {0}")]
    FileError(#[source] io::Error),
    #[error(
        "Error parsing the configuration JSON file: {0}\n\
        You can attempt to fix the file manually, or delete it \
        (you will lose your settings).\n\
        The configuration file can be found in '{1}'"
    )]
    BadDeserialization(#[source] serde_json::Error, String),
}

#[derive(Error, Debug)]
pub enum WriteConfigError {
    #[error("Configuration JSON path ('{0}') exists, but is not a file!")]
    NotAFile(String),
    #[error("Error opening the configuration JSON file for writing: '{0}'")]
    FileError(#[source] io::Error),
    #[error(
        "Error writing the settings to file: '{0}'\n\
        This session's changes have not been saved, and it is \
        possible that your configuration file has become corrupted. \
        You can attempt to fix the file manually, or delete it \
        (you will lose your settings).\n\
        The configuration file can be found in '{1}'."
    )]
    BadSerialization(#[source] serde_json::Error, String),
}

/// A `Config` together with the file it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    path: PathBuf,
}

impl LoadedConfig {
    /// Reads `config.json`, falling back to defaults when it does not exist.
    pub fn load_config(paths: &Paths) -> Result<Self, LoadConfigError> {
        let path = paths.config_file();
        let config = Config::load_config(&path)?.unwrap_or_default();
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(LoadedConfig { config, path })
    }

    pub fn write_config(&self) -> Result<(), WriteConfigError> {
        let json_path = &self.path;
        if json_path.exists() && !json_path.is_file() {
            return Err(WriteConfigError::NotAFile(
                json_path.to_string_lossy().to_string(),
            ));
        }
        let json_file = fs::File::create(json_path).map_err(WriteConfigError::FileError)?;
        let writer = BufWriter::new(json_file);
        serde_json::to_writer_pretty(writer, &self.config).map_err(|e| {
            WriteConfigError::BadSerialization(e, json_path.to_string_lossy().to_string())
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = LoadedConfig::load_config(&Paths::new(dir.path())).unwrap();
        assert_eq!(loaded.config, Config::default());
        assert!(!loaded.path().exists());
    }

    #[test]
    fn scene_filters_survive_a_write() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::new(dir.path());
        let mut loaded = LoadedConfig::load_config(&paths).unwrap();
        loaded.config.scene_filters = vec!["lxo".to_string(), "fbx".to_string()];
        loaded.write_config().unwrap();

        let reloaded = LoadedConfig::load_config(&paths).unwrap();
        assert_eq!(reloaded.config.scene_filters, vec!["lxo", "fbx"]);
        let exts: Vec<_> = reloaded
            .config
            .scene_types()
            .iter()
            .map(|t| t.extensions[0])
            .collect();
        assert_eq!(exts, vec![".lxo", ".fbx"]);
    }

    #[test]
    fn garbage_config_is_reported() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::new(dir.path());
        fs::write(paths.config_file(), "{ not json").unwrap();
        match LoadedConfig::load_config(&paths) {
            Err(LoadConfigError::BadDeserialization(_, path)) => {
                assert!(path.ends_with("config.json"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_filter_keys_are_skipped() {
        let config = Config {
            scene_filters: vec!["nope".to_string(), "obj".to_string()],
            ..Config::default()
        };
        assert_eq!(config.scene_types().len(), 1);
    }

    #[test]
    fn create_makes_the_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let paths = Paths::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(paths.templates_dir(), nested.join("templates"));
    }
}
