use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory that auto-named reports are written into.
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
    /// Hash used when no --hash flag is given.
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,
    /// Glob patterns excluded from both scans.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_report_dir() -> String {
    ".".to_string()
}

fn default_algorithm() -> String {
    "md5".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            report_dir: default_report_dir(),
            default_algorithm: default_algorithm(),
            ignore_patterns: Vec::new(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.report_dir, ".");
        assert_eq!(config.default_algorithm, "md5");
        assert!(config.ignore_patterns.is_empty());
    }
}
