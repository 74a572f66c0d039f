//! Configuration management for the insurance cost predictor

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// ML models configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing ONNX model files and importance sidecars
    pub models_dir: String,
    /// Number of threads for ONNX inference per model (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
    #[serde(default = "default_random_forest")]
    pub random_forest: EstimatorConfig,
    #[serde(default = "default_gradient_boosting")]
    pub gradient_boosting: EstimatorConfig,
}

/// Files and labels for one estimator
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Short name used in logs and JSON output
    pub name: String,
    /// Human-readable label for reports
    pub label: String,
    /// ONNX model file, relative to `models_dir`
    pub file: String,
    /// JSON file with the model's feature importances, relative to `models_dir`
    pub importances_file: String,
    /// Output tensor to read; the first output when unset
    #[serde(default)]
    pub output_name: Option<String>,
}

impl EstimatorConfig {
    pub fn model_path(&self, models_dir: &Path) -> PathBuf {
        models_dir.join(&self.file)
    }

    pub fn importances_path(&self, models_dir: &Path) -> PathBuf {
        models_dir.join(&self.importances_file)
    }
}

/// Display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places for printed costs
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_onnx_threads() -> usize {
    1
}

fn default_decimals() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_random_forest() -> EstimatorConfig {
    EstimatorConfig {
        name: "random_forest".to_string(),
        label: "Random Forest".to_string(),
        file: "rf_insurance.onnx".to_string(),
        importances_file: "rf_insurance.importances.json".to_string(),
        output_name: None,
    }
}

fn default_gradient_boosting() -> EstimatorConfig {
    EstimatorConfig {
        name: "xgboost".to_string(),
        label: "XGBoost".to_string(),
        file: "xgb_insurance.onnx".to_string(),
        importances_file: "xgb_insurance.importances.json".to_string(),
        output_name: None,
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `INSURANCE__` override it, e.g. `INSURANCE__MODELS__MODELS_DIR`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .set_default("models.models_dir", "models")?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("INSURANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn models_dir(&self) -> &Path {
        Path::new(&self.models.models_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                models_dir: "models".to_string(),
                onnx_threads: default_onnx_threads(),
                random_forest: default_random_forest(),
                gradient_boosting: default_gradient_boosting(),
            },
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.models_dir, "models");
        assert_eq!(config.models.onnx_threads, 1);
        assert_eq!(config.models.random_forest.label, "Random Forest");
        assert_eq!(config.models.gradient_boosting.name, "xgboost");
        assert_eq!(config.display.decimals, 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[models]
models_dir = "/srv/models"
onnx_threads = 2

[models.gradient_boosting]
name = "gbm"
label = "Gradient Boosting"
file = "gbm.onnx"
importances_file = "gbm.json"
output_name = "variable"

[display]
decimals = 0
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.models_dir(), Path::new("/srv/models"));
        assert_eq!(config.models.onnx_threads, 2);
        assert_eq!(config.models.random_forest.file, "rf_insurance.onnx");
        assert_eq!(config.models.gradient_boosting.label, "Gradient Boosting");
        assert_eq!(
            config.models.gradient_boosting.output_name.as_deref(),
            Some("variable")
        );
        assert_eq!(config.display.decimals, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_shipped_config() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.models.random_forest.file, "rf_insurance.onnx");
        assert_eq!(config.models.gradient_boosting.label, "XGBoost");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.models.models_dir, "models");
        assert_eq!(config.models.random_forest.name, "random_forest");
    }

    #[test]
    fn test_estimator_paths() {
        let config = AppConfig::default();
        let dir = Path::new("/opt/models");
        assert_eq!(
            config.models.random_forest.model_path(dir),
            PathBuf::from("/opt/models/rf_insurance.onnx")
        );
        assert_eq!(
            config.models.random_forest.importances_path(dir),
            PathBuf::from("/opt/models/rf_insurance.importances.json")
        );
    }
}
