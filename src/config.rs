use std::env::{self, VarError};
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, error, info};
use url::Url;

use crate::error::{BridgeError, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GRAPH_API_VERSION: &str = "v22.0";
const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LEARNING_LOG_PATH: &str = "aprendizaje.txt";
const DEFAULT_TURN_CAP: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub verify_token: String,
    pub access_token: String,
    pub app_secret: String,
    pub port: u16,
    pub graph_api_version: String,
    pub graph_api_base: Url,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: Url,
    pub learning_log_path: PathBuf,
    pub turn_cap: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let vars = Vars { lookup };

        let verify_token = vars.required("META_VERIFY_TOKEN")?;
        let access_token = vars.required("META_JWT_TOKEN")?;
        let app_secret = vars.required("APP_SECRET")?;
        let openai_api_key = vars.required("OPENAI_API_KEY")?;

        let port = vars.parsed("PORT", DEFAULT_PORT)?;
        let turn_cap = vars.parsed("AUTOMATED_TURN_CAP", DEFAULT_TURN_CAP)?;
        let graph_api_version = vars.or_default("GRAPH_API_VERSION", DEFAULT_GRAPH_API_VERSION);
        let graph_api_base =
            Url::parse(&vars.or_default("GRAPH_API_BASE", DEFAULT_GRAPH_API_BASE))?;
        let openai_model = vars.or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
        let openai_api_url =
            Url::parse(&vars.or_default("OPENAI_API_URL", DEFAULT_OPENAI_API_URL))?;
        let learning_log_path =
            PathBuf::from(vars.or_default("LEARNING_LOG_PATH", DEFAULT_LEARNING_LOG_PATH));

        info!("Configuration loaded successfully");
        debug!("Verify token length: {} characters", verify_token.len());
        debug!("Access token length: {} characters", access_token.len());
        debug!("App secret length: {} characters", app_secret.len());
        debug!("OpenAI API key length: {} characters", openai_api_key.len());
        debug!("Graph API: {graph_api_base} ({graph_api_version})");
        debug!("OpenAI model: {openai_model}");
        debug!("Learning log: {}", learning_log_path.display());
        debug!("Automated turn cap: {turn_cap}");

        Ok(Self {
            verify_token,
            access_token,
            app_secret,
            port,
            graph_api_version,
            graph_api_base,
            openai_api_key,
            openai_model,
            openai_api_url,
            learning_log_path,
            turn_cap,
        })
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn required(&self, name: &str) -> Result<String> {
        (self.lookup)(name).ok_or_else(|| {
            error!("Failed to load {name} from environment: {}", VarError::NotPresent);
            BridgeError::from(VarError::NotPresent)
        })
    }

    /// Unset and blank values both count as missing.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, name: &str, default: T) -> Result<T> {
        match self.optional(name) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                error!("Invalid value for {name}: {raw}");
                BridgeError::Config(format!("{name} has an invalid value: {raw}"))
            }),
            None => Ok(default),
        }
    }
}
