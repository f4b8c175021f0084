use std::collections::HashMap;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "MENUCARD_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MenuConfig {
    pub title: String,
    pub currency: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Require the whole price to be a number, rather than just a leading
    /// numeric part.
    pub strict_prices: bool,
}

#[derive(Deserialize, Debug, Default)]
struct ValidationOverrides {
    strict_prices: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    modules: HashMap<String, LogLevel>,
    timestamp_nanos: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            title: "Menu".to_string(),
            currency: "R".to_string(),
        }
    }
}

impl Config {
    /// Applies `MENUCARD_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(std::env::vars())
    }

    fn with_overrides_from<I: IntoIterator<Item = (String, String)>>(
        mut self,
        vars: I,
    ) -> Result<Self> {
        let overrides: ValidationOverrides = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .context("read environment overrides")?;
        debug!("Environment overrides: {:?}", overrides);
        if let Some(strict) = overrides.strict_prices {
            self.validation.strict_prices = strict;
        }
        Ok(self)
    }
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            &LogLevel::Off => log::LevelFilter::Off,
            &LogLevel::Error => log::LevelFilter::Error,
            &LogLevel::Warn => log::LevelFilter::Warn,
            &LogLevel::Info => log::LevelFilter::Info,
            &LogLevel::Debug => log::LevelFilter::Debug,
            &LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        return b;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::hashmap;

    #[derive(Deserialize, Debug)]
    struct File {
        #[serde(flatten)]
        menucard: Config,
        #[serde(default)]
        env_logger: EnvLogger,
    }

    #[test]
    fn should_default_everything() {
        let file: File = toml::from_str("").expect("parse");

        assert_eq!(file.menucard, Config::default());
        assert_eq!(file.menucard.menu.currency, "R");
        assert!(!file.menucard.validation.strict_prices);
        assert_eq!(file.env_logger.level, None);
    }

    #[test]
    fn should_read_all_sections() {
        let file: File = toml::from_str(
            r#"
            [menu]
            title = "Christoffel's Menu"

            [validation]
            strict_prices = true

            [env_logger]
            level = "info"
            timestamp_nanos = true
            [env_logger.modules]
            menucard = "debug"
            "#,
        )
        .expect("parse");

        assert_eq!(file.menucard.menu.title, "Christoffel's Menu");
        assert_eq!(file.menucard.menu.currency, "R");
        assert!(file.menucard.validation.strict_prices);
        assert_eq!(file.env_logger.level, Some(LogLevel::Info));
        assert_eq!(
            file.env_logger.modules,
            hashmap! { "menucard".to_string() => LogLevel::Debug }
        );
        assert!(file.env_logger.timestamp_nanos);
    }

    #[test]
    fn env_should_override_strictness() {
        let vars = vec![
            ("MENUCARD_STRICT_PRICES".to_string(), "true".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];
        let config = Config::default()
            .with_overrides_from(vars)
            .expect("overrides");

        assert!(config.validation.strict_prices);
    }

    #[test]
    fn absent_env_should_leave_config_alone() {
        let mut config = Config::default();
        config.validation.strict_prices = true;

        let config = config.with_overrides_from(Vec::<(String, String)>::new()).expect("overrides");

        assert!(config.validation.strict_prices);
    }

    #[test]
    fn bad_env_value_should_fail() {
        let vars = vec![("MENUCARD_STRICT_PRICES".to_string(), "maybe".to_string())];
        assert!(Config::default().with_overrides_from(vars).is_err());
    }
}
