use dirs::data_dir;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tower_lsp::lsp_types::DiagnosticSeverity;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")] // Ensures case-insensitivity
pub enum ConfigDiagnosticSeverity {
    Error,
    Info,
    Warning,
    Hint,
}

impl ConfigDiagnosticSeverity {
    pub fn to_lsp_diagnostic(&self) -> DiagnosticSeverity {
        match self {
            ConfigDiagnosticSeverity::Error => DiagnosticSeverity::ERROR,
            ConfigDiagnosticSeverity::Info => DiagnosticSeverity::INFORMATION,
            ConfigDiagnosticSeverity::Warning => DiagnosticSeverity::WARNING,
            ConfigDiagnosticSeverity::Hint => DiagnosticSeverity::HINT,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    #[serde(default = "default_diagnostic_severity")]
    pub diagnostic_severity: ConfigDiagnosticSeverity,
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            diagnostic_severity: default_diagnostic_severity(),
            min_word_length: default_min_word_length(),
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing keys fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        info!("reading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Config>(&text)?.expanded())
    }

    /// Builds a config from LSP `initializationOptions`, falling back to the
    /// defaults when the options are absent or malformed.
    pub fn from_init_options(options: Option<serde_json::Value>) -> Config {
        let Some(options) = options else {
            return Config::default();
        };
        match serde_json::from_value::<Config>(options) {
            Ok(config) => config.expanded(),
            Err(err) => {
                warn!("ignoring invalid initialization options: {err}");
                Config::default()
            }
        }
    }

    pub fn with_dictionary(mut self, dictionary: Option<PathBuf>) -> Config {
        if let Some(path) = dictionary {
            self.dictionary = path;
        }
        self.expanded()
    }

    fn expanded(mut self) -> Config {
        if let Some(path) = expand_tilde(&self.dictionary) {
            self.dictionary = path;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_diagnostic_severity() -> ConfigDiagnosticSeverity {
    ConfigDiagnosticSeverity::Info
}

fn default_min_word_length() -> usize {
    1
}

fn default_dictionary() -> PathBuf {
    let mut path = data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wordcheck");
    path.push("words.txt");
    path
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    if p == Path::new("~") {
        return dirs::home_dir();
    }
    let rest = p.strip_prefix("~").ok()?;
    dirs::home_dir().map(|home| home_join(home, rest))
}

fn home_join(home: PathBuf, rest: &Path) -> PathBuf {
    home.join(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = Config::from_init_options(Some(json!({ "min_word_length": 3 })));
        assert_eq!(config.min_word_length, 3);
        assert_eq!(config.diagnostic_severity, ConfigDiagnosticSeverity::Info);
        assert!(config.dictionary.ends_with("wordcheck/words.txt"));
    }

    #[test]
    fn severity_is_lowercase() {
        let config = Config::from_init_options(Some(json!({
            "dictionary": "/usr/share/dict/words",
            "diagnostic_severity": "warning"
        })));
        assert_eq!(config.dictionary, PathBuf::from("/usr/share/dict/words"));
        assert_eq!(
            config.diagnostic_severity.to_lsp_diagnostic(),
            DiagnosticSeverity::WARNING
        );
    }

    #[test]
    fn malformed_options_use_defaults() {
        let config = Config::from_init_options(Some(json!({ "min_word_length": "three" })));
        assert_eq!(config.min_word_length, 1);
        assert_eq!(Config::from_init_options(None).min_word_length, 1);
    }

    #[test]
    fn command_line_dictionary_wins() {
        let config = Config::default().with_dictionary(Some(PathBuf::from("/tmp/words")));
        assert_eq!(config.dictionary, PathBuf::from("/tmp/words"));
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(
            expand_tilde("/abs/path"),
            Some(PathBuf::from("/abs/path"))
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), Some(home.clone()));
            if home != Path::new("/") {
                assert_eq!(expand_tilde("~/words.txt"), Some(home.join("words.txt")));
            }
        }
    }

    #[test]
    fn root_home_stays_absolute() {
        assert_eq!(
            home_join(PathBuf::from("/"), Path::new("words.txt")),
            PathBuf::from("/words.txt")
        );
        assert_eq!(
            home_join(PathBuf::from("/home/me"), Path::new("dict/words.txt")),
            PathBuf::from("/home/me/dict/words.txt")
        );
    }

    #[test]
    fn missing_config_file() {
        assert!(matches!(
            Config::from_file("/no/such/wordcheck.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
