//! Application configuration management.

use serde::Deserialize;

use crate::types::{MAX_ROWS, ParseMode, ReportTemplate};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Form handling configuration.
    #[serde(default)]
    pub form: FormConfig,
    /// Report layout.
    #[serde(default)]
    pub template: ReportTemplate,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Form handling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// How user-entered numbers are interpreted.
    #[serde(default)]
    pub parse_mode: ParseMode,
    /// Maximum number of custom income rows read from a submission.
    #[serde(default = "default_max_income_rows")]
    pub max_income_rows: usize,
    /// Maximum number of custom expense rows read from a submission.
    #[serde(default = "default_max_expense_rows")]
    pub max_expense_rows: usize,
}

fn default_max_income_rows() -> usize {
    50
}

fn default_max_expense_rows() -> usize {
    80
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::default(),
            max_income_rows: default_max_income_rows(),
            max_expense_rows: default_max_expense_rows(),
        }
    }
}

impl FormConfig {
    /// Checks the row caps against [`MAX_ROWS`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first cap that is too large.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        for (key, value) in [
            ("form.max_income_rows", self.max_income_rows),
            ("form.max_expense_rows", self.max_expense_rows),
        ] {
            if value > MAX_ROWS {
                return Err(config::ConfigError::Message(format!(
                    "{key} = {value} exceeds the limit of {MAX_ROWS}"
                )));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a row cap is out of range.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DKM").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.form.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML document, without files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, does not match the
    /// schema, or sets a row cap out of range.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.form.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.form.parse_mode, ParseMode::Lenient);
        assert_eq!(config.form.max_income_rows, 50);
        assert_eq!(config.form.max_expense_rows, 80);
        assert_eq!(config.template, ReportTemplate::default());
    }

    #[test]
    fn test_template_override_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [form]
            parse_mode = "strict"

            [template]
            title = "Laporan Keuangan DKM Al-Ikhlas"
            fixed_expense = []

            [[template.fixed_income]]
            label = "Kotak Amal ({count}x)"
            count_field = "kotak_kali"
            amount_field = "kotak_total"
            "#,
        )
        .unwrap();

        assert_eq!(config.form.parse_mode, ParseMode::Strict);
        assert_eq!(config.template.title, "Laporan Keuangan DKM Al-Ikhlas");
        assert!(config.template.fixed_expense.is_empty());
        assert_eq!(config.template.fixed_income.len(), 1);
        assert_eq!(config.template.fixed_income[0].amount_field, "kotak_total");
        // Untouched sections keep their defaults.
        assert_eq!(config.template.address, "Aspol Sukamiskin Bandung");
        assert!(config.template.rt_breakdown.is_some());
    }

    #[test]
    fn test_load_reads_environment() {
        temp_env::with_vars(
            [
                ("DKM__SERVER__PORT", Some("9090")),
                ("DKM__FORM__PARSE_MODE", Some("strict")),
                ("DKM__FORM__MAX_INCOME_ROWS", Some("10")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.form.parse_mode, ParseMode::Strict);
                assert_eq!(config.form.max_income_rows, 10);
                assert_eq!(config.form.max_expense_rows, 80);
            },
        );
    }

    #[test]
    fn test_row_cap_above_limit_is_rejected() {
        let err = AppConfig::from_toml("[form]\nmax_expense_rows = 1001\n")
            .err()
            .unwrap();
        assert!(err.to_string().contains("form.max_expense_rows"));

        let config = AppConfig::from_toml("[form]\nmax_income_rows = 1000\n").unwrap();
        assert_eq!(config.form.max_income_rows, MAX_ROWS);
    }

    #[test]
    fn test_load_rejects_huge_row_cap_from_environment() {
        temp_env::with_var("DKM__FORM__MAX_INCOME_ROWS", Some("5000"), || {
            let err = AppConfig::load().err().unwrap();
            assert!(err.to_string().contains("form.max_income_rows"));
        });
    }
}
