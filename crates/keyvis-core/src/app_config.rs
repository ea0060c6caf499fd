use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub keyword_model: String,
    pub search_model: String,
    pub extraction_model: String,
    pub http_timeout_secs: u64,
    pub query_timeout_secs: u64,
    pub max_concurrent_queries: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("openai_api_key", &"[redacted]")
            .field("openai_base_url", &self.openai_base_url)
            .field("keyword_model", &self.keyword_model)
            .field("search_model", &self.search_model)
            .field("extraction_model", &self.extraction_model)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .field("max_concurrent_queries", &self.max_concurrent_queries)
            .finish()
    }
}
