use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the enrollment shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The file rosters are saved to and loaded from when no path is given.
    roster_file: PathBuf,

    /// Whether to print the command menu before each prompt.
    pub show_menu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_file: default_roster_file(),
            show_menu: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the default roster file.
    #[must_use]
    pub fn roster_file(&self) -> &Path {
        &self.roster_file
    }

    /// Sets the default roster file.
    pub fn set_roster_file(&mut self, path: PathBuf) {
        self.roster_file = path;
    }
}

fn default_roster_file() -> PathBuf {
    PathBuf::from("saved_roster.txt")
}

const fn default_show_menu() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_roster_file")]
        roster_file: PathBuf,

        #[serde(default = "default_show_menu")]
        show_menu: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                roster_file,
                show_menu,
            } => Self {
                roster_file,
                show_menu,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            roster_file: config.roster_file,
            show_menu: config.show_menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nroster_file = \"cs300.txt\"\nshow_menu = false\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.roster_file(), Path::new("cs300.txt"));
        assert!(!config.show_menu);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nshow_menu = \"sometimes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("enroll.toml");

        let mut config = Config::default();
        config.set_roster_file(PathBuf::from("rosters/cs300.txt"));
        config.show_menu = false;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
