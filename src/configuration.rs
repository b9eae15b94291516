use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::validation::VALIDATION_THRESHOLD;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub search: SearchSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub worker_count: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_delay_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_results: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub validation_threshold: f64,
    pub endpoint: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            worker_count: 5,
            request_delay_secs: 1,
            max_results: 3,
            timeout_secs: 10,
            validation_threshold: VALIDATION_THRESHOLD,
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
        }
    }
}

impl SearchSettings {
    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn check(&self) -> Result<(), config::ConfigError> {
        if self.worker_count == 0 {
            return Err(config::ConfigError::Message(
                "search.worker_count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.validation_threshold) {
            return Err(config::ConfigError::Message(format!(
                "search.validation_threshold must be within [0, 1], got {}",
                self.validation_threshold
            )));
        }
        Ok(())
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.search.check()?;

    Ok(settings)
}
