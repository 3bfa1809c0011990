use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Completion provider
    pub gemini_api_key: String,
    pub gemini_model: String,

    // Browserless
    pub browserless_url: String,
    pub browserless_token: Option<String>,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: required_env("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| gemini_client::DEFAULT_MODEL.to_string()),
            browserless_url: required_env("BROWSERLESS_URL"),
            browserless_token: env::var("BROWSERLESS_TOKEN").ok(),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
