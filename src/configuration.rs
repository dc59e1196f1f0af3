use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub linkedin: LinkedinSettings,
    pub llm: LlmSettings,
    pub webdriver: WebDriverSettings,
    pub crawler: CrawlerSettings,
    pub export: ExportSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct LinkedinSettings {
    pub login_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Clone)]
pub struct LlmSettings {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Deserialize, Clone)]
pub struct WebDriverSettings {
    pub engines: Vec<DriverEngine>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct DriverEngine {
    pub browser: Browser,
    pub server_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
}

fn default_headless() -> bool {
    true
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Firefox,
    Chrome,
}

#[derive(Deserialize, Clone)]
pub struct CrawlerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub login_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub redirect_wait_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub settle_delay_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_delay_secs: u64,
}

impl CrawlerSettings {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn redirect_wait(&self) -> Duration {
        Duration::from_secs(self.redirect_wait_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }
}

#[derive(Deserialize, Clone)]
pub struct ExportSettings {
    pub directory: String,
}

/// The possible runtime environment for our application.
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

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
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
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_APPLICATION__PORT=5001` would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("linkedin.username", env_override("LINKEDIN_USERNAME"))?
        .set_override_option("linkedin.password", env_override("LINKEDIN_PASSWORD"))?
        .set_override_option("llm.api_key", env_override("OPENAI_API_KEY"))?
        .set_override_option("llm.api_base", env_override("OPENAI_API_ENDPOINT"))?
        .set_override_option("llm.model", env_override("LLM_MODEL"))?
        .build()?;

    settings.try_deserialize::<Settings>()
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
