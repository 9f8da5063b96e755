use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use config::{ConfigError, FileFormat};
use wayfare_core::{AnalyticsSettings, CommissionPolicy};
use wayfare_domain::ServiceCategory;

use crate::snapshot::CollectionLayout;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,
    /// Per-category overrides, keyed by category name ("flight", "hotel", ...)
    #[serde(default)]
    pub category_commission_rates: HashMap<String, f64>,
    #[serde(default = "default_months_back")]
    pub months_back: usize,
    #[serde(default = "default_list_limit")]
    pub top_limit: usize,
    #[serde(default = "default_list_limit")]
    pub upcoming_limit: usize,
    #[serde(default = "default_list_limit")]
    pub recent_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
            category_commission_rates: HashMap::new(),
            months_back: default_months_back(),
            top_limit: default_list_limit(),
            upcoming_limit: default_list_limit(),
            recent_limit: default_list_limit(),
        }
    }
}

fn default_commission_rate() -> f64 { 0.10 }
fn default_months_back() -> usize { 6 }
fn default_list_limit() -> usize { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct BookingCollectionConfig {
    pub name: String,
    /// Category assumed for documents that do not state one
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON file used to seed the in-memory document store
    pub seed_path: Option<String>,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    #[serde(default = "default_booking_collections")]
    pub booking_collections: Vec<BookingCollectionConfig>,
    #[serde(default = "default_partners")]
    pub partners_collection: String,
    #[serde(default = "default_customers")]
    pub customers_collection: String,
    #[serde(default = "default_complaints")]
    pub complaints_collection: String,
    /// Treat a missing collection as an error instead of an empty result
    #[serde(default)]
    pub strict_collections: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            refresh_interval_seconds: default_refresh_interval(),
            booking_collections: default_booking_collections(),
            partners_collection: default_partners(),
            customers_collection: default_customers(),
            complaints_collection: default_complaints(),
            strict_collections: false,
        }
    }
}

fn default_refresh_interval() -> u64 { 300 }
fn default_partners() -> String { "partners".into() }
fn default_customers() -> String { "customers".into() }
fn default_complaints() -> String { "complaints".into() }

fn default_booking_collections() -> Vec<BookingCollectionConfig> {
    vec![BookingCollectionConfig {
        name: "bookings".into(),
        category: None,
    }]
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, if present
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `WAYFARE_SERVER__PORT=8080` sets `server.port`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document directly, without files or environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics_settings()?;
        self.collection_layout()?;
        if self.data.refresh_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "data.refresh_interval_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn analytics_settings(&self) -> Result<AnalyticsSettings, ConfigError> {
        let analytics = &self.analytics;
        let mut commission = CommissionPolicy::flat(analytics.commission_rate)
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        for (label, rate) in &analytics.category_commission_rates {
            let category = parse_category(label)?;
            commission = commission
                .with_category_rate(category, *rate)
                .map_err(|e| ConfigError::Message(e.to_string()))?;
        }

        let settings = AnalyticsSettings {
            commission,
            months_back: analytics.months_back,
            top_limit: analytics.top_limit,
            upcoming_limit: analytics.upcoming_limit,
            recent_limit: analytics.recent_limit,
        };
        settings
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }

    pub fn collection_layout(&self) -> Result<CollectionLayout, ConfigError> {
        let data = &self.data;
        let bookings = data
            .booking_collections
            .iter()
            .map(|c| {
                let hint = c.category.as_deref().map(parse_category).transpose()?;
                Ok((c.name.clone(), hint))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        if bookings.is_empty() {
            return Err(ConfigError::Message(
                "data.booking_collections must name at least one collection".into(),
            ));
        }

        Ok(CollectionLayout {
            bookings,
            partners: data.partners_collection.clone(),
            customers: data.customers_collection.clone(),
            complaints: data.complaints_collection.clone(),
        })
    }
}

fn parse_category(label: &str) -> Result<ServiceCategory, ConfigError> {
    ServiceCategory::from_label(label)
        .ok_or_else(|| ConfigError::Message(format!("Unknown service category: {}", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);

        let settings = config.analytics_settings().unwrap();
        assert_eq!(settings.commission.rate_for(None), 0.10);
        assert_eq!(settings.months_back, 6);
        assert_eq!(settings.top_limit, 5);

        let layout = config.collection_layout().unwrap();
        assert_eq!(layout.bookings, vec![("bookings".to_string(), None)]);
        assert_eq!(layout.partners, "partners");
    }

    #[test]
    fn test_category_rates_and_collections() {
        let toml = r#"
            [server]
            port = 8080

            [analytics]
            commission_rate = 0.12
            category_commission_rates = { flight = 0.03 }

            [[data.booking_collections]]
            name = "carBookings"
            category = "vehicle"

            [[data.booking_collections]]
            name = "holidayBookings"
            category = "tour"
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        let settings = config.analytics_settings().unwrap();
        assert_eq!(settings.commission.rate_for(Some(ServiceCategory::Flight)), 0.03);
        assert_eq!(settings.commission.rate_for(Some(ServiceCategory::Hotel)), 0.12);

        let layout = config.collection_layout().unwrap();
        assert_eq!(layout.bookings[0], ("carBookings".to_string(), Some(ServiceCategory::Vehicle)));
        assert_eq!(layout.bookings[1].1, Some(ServiceCategory::Holiday));
    }

    #[test]
    fn test_rejects_commission_outside_unit_range() {
        let toml = "[server]\nport = 8080\n[analytics]\ncommission_rate = 1.5\n";
        assert!(Config::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rejects_oversized_month_window() {
        let toml = "[server]\nport = 8080\n[analytics]\nmonths_back = 1000000000000\n";
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("months_back"));
    }

    #[test]
    fn test_rejects_unknown_collection_category() {
        let toml = r#"
            [server]
            port = 8080

            [[data.booking_collections]]
            name = "cruiseBookings"
            category = "cruise"
        "#;
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("cruise"));
    }
}
