use serde::Deserialize;

/// Default browser-like user agent sent with page fetches
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default cap on the length of extracted page text, in characters
pub const DEFAULT_MAX_TEXT_CHARS: usize = 50_000;

/// Main configuration structure for Metaharvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub license: LicenseConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Page fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum number of characters kept from a page's text
    #[serde(rename = "max-text-chars")]
    pub max_text_chars: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of successfully fetched pages per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self { max_pages: 3 }
    }
}

/// License extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// How many scored license links are analyzed besides the seed page
    #[serde(rename = "candidate-pages")]
    pub candidate_pages: usize,

    /// Maximum length of the scored license link list
    #[serde(rename = "max-candidates")]
    pub max_candidates: usize,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            candidate_pages: 3,
            max_candidates: 5,
        }
    }
}

/// Text-analysis service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Base URL of the OpenAI-compatible API
    pub endpoint: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens to generate per completion
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Additional attempts after a failed analyzer call
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1".to_string(),
            model: "moonshotai/kimi-k2-instruct-0905".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            timeout_secs: 120,
            api_key_env: "GROQ_API_KEY".to_string(),
            max_retries: 2,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where report files are written
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}
