use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "draft_analyzer.toml";
pub const CONFIG_PATH_ENV: &str = "DRAFT_ANALYZER_CONFIG";

const BACKEND_URL_ENV: &str = "DRAFT_ANALYZER_BACKEND_URL";
const PREDICTION_URL_ENV: &str = "DRAFT_ANALYZER_PREDICTION_URL";
const TIMEOUT_ENV: &str = "DRAFT_ANALYZER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the trends/headline/urls backend.
    pub backend_url: String,
    /// Full URL of the sentiment prediction endpoint.
    pub prediction_url: String,
    /// No timeout unless configured.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "https://yeswrite.herokuapp.com".into(),
            prediction_url: "http://127.0.0.1:8080/interpret".into(),
            request_timeout_secs: None,
            user_agent: concat!("draft-analyzer/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// On-disk shape; every key optional so a file can override a subset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    backend_url: Option<String>,
    prediction_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl Settings {
    /// Defaults, then the TOML file (explicit path, `DRAFT_ANALYZER_CONFIG`, or
    /// `draft_analyzer.toml` in the working directory if present), then env.
    ///
    /// URLs are not validated here; callers apply their own overrides first
    /// and then call [`Settings::validate`].
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit_path, |key| std::env::var(key).ok())
    }

    pub fn load_with<F>(explicit_path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                p.exists().then_some(p)
            });

        if let Some(path) = path {
            debug!("Loading config file: {}", path.display());
            settings.merge_file(&path)?;
        }

        settings.apply_env(lookup)?;
        Ok(settings)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: FileSettings = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(v) = file.backend_url {
            self.backend_url = v;
        }
        if let Some(v) = file.prediction_url {
            self.prediction_url = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = Some(v);
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        Ok(())
    }

    /// Env overrides through a lookup function so tests need not touch the
    /// process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(BACKEND_URL_ENV) {
            self.backend_url = v;
        }
        if let Some(v) = lookup(PREDICTION_URL_ENV) {
            self.prediction_url = v;
        }
        if let Some(v) = lookup(TIMEOUT_ENV) {
            let secs = v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: TIMEOUT_ENV,
                value: v.clone(),
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_base()?;
        self.prediction_endpoint()?;
        Ok(())
    }

    pub fn backend_base(&self) -> Result<Url, ConfigError> {
        parse_url("backend_url", &self.backend_url)
    }

    pub fn prediction_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("prediction_url", &self.prediction_url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.request_timeout(), None);
    }

    #[test]
    fn file_overrides_subset_of_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "backend_url = \"http://localhost:5000\"").unwrap();
        writeln!(file, "request_timeout_secs = 12").unwrap();

        let mut s = Settings::default();
        s.merge_file(file.path()).expect("merge");
        assert_eq!(s.backend_url, "http://localhost:5000");
        assert_eq!(s.request_timeout(), Some(Duration::from_secs(12)));
        assert_eq!(s.prediction_url, Settings::default().prediction_url);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "backend = \"http://localhost:5000\"").unwrap();
        let err = Settings::default().merge_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DRAFT_ANALYZER_BACKEND_URL", "http://env-backend:9000"),
            ("DRAFT_ANALYZER_TIMEOUT_SECS", "3"),
        ]);
        let mut s = Settings {
            backend_url: "http://file-backend".into(),
            ..Settings::default()
        };
        s.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(s.backend_url, "http://env-backend:9000");
        assert_eq!(s.request_timeout_secs, Some(3));
    }

    #[test]
    fn bad_timeout_env_is_an_error() {
        let mut s = Settings::default();
        let err = s
            .apply_env(|k| (k == "DRAFT_ANALYZER_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn invalid_url_fails_validation() {
        let s = Settings {
            prediction_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            s.validate(),
            Err(ConfigError::InvalidUrl { field: "prediction_url", .. })
        ));
    }

    #[test]
    fn bad_env_url_can_be_replaced_by_a_later_layer() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "prediction_url = \"http://localhost:8081/interpret\"").unwrap();
        let env: HashMap<&str, &str> =
            HashMap::from([("DRAFT_ANALYZER_BACKEND_URL", "not a url")]);

        let mut s = Settings::load_with(Some(file.path()), |k| env.get(k).map(|v| v.to_string()))
            .expect("loading does not validate");
        assert_eq!(s.backend_url, "not a url");
        assert!(s.validate().is_err());

        s.backend_url = "http://127.0.0.1:5000".into();
        assert!(s.validate().is_ok());
        assert_eq!(s.backend_base().unwrap().as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn invalid_url_message_does_not_repeat_its_cause() {
        let err = Settings {
            backend_url: "not a url".into(),
            ..Settings::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid backend_url URL \"not a url\"");
        assert!(std::error::Error::source(&err).is_some());
    }
}
