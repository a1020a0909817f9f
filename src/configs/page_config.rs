use log::LevelFilter;
use serde::{ Deserialize, Serialize };

use crate::error::ConfigError;
use crate::host::{ Element, ObserverOptions, Page };

/// `<script id="portfolio-config" type="application/json">` holding overrides.
pub const CONFIG_SELECTOR: &str = "#portfolio-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub home_page: String,
    pub index_page: String,
    pub loaded_delay_ms: u32,
    pub global_namespace: String,
    pub log_level: String,
    pub responsive: ResponsiveConfig,
    pub reveal: RevealConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponsiveConfig {
    pub debounce_ms: u32,
    pub breakpoint_px: f64,
    pub gutter_px: f64,
    pub max_width_px: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub offset_px: f64,
    pub duration_s: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_page: "home.html".to_string(),
            index_page: "index.html".to_string(),
            loaded_delay_ms: 100,
            global_namespace: "portfolioUtils".to_string(),
            log_level: "info".to_string(),
            responsive: ResponsiveConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            breakpoint_px: 400.0,
            gutter_px: 40.0,
            max_width_px: 400.0,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            offset_px: 20.0,
            duration_s: 0.6,
        }
    }
}

impl RevealConfig {
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from the page, falling back to defaults when they are
    /// missing or unusable.
    pub fn from_page<P: Page>(page: &P) -> Self {
        let Some(json) = page.find(CONFIG_SELECTOR).and_then(|el| el.text()) else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::debug!("Loaded page config: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if self.responsive.breakpoint_px.is_nan() || self.responsive.breakpoint_px <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "responsive.breakpointPx",
                reason: format!("must be positive, got {}", self.responsive.breakpoint_px),
            });
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal.threshold",
                reason: format!("must be within 0..=1, got {}", self.reveal.threshold),
            });
        }
        if self.global_namespace.is_empty() {
            return Err(ConfigError::Invalid {
                field: "globalNamespace",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level.parse::<LevelFilter>().map_err(|_| ConfigError::Invalid {
            field: "logLevel",
            reason: format!("unknown level {:?}", self.log_level),
        })
    }
}
