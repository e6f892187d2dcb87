//! Whole-site research mode
//!
//! Instead of crawling pages itself, the [`SiteResearcher`] sends one query
//! naming the dataset URL and lets the analysis service browse the site with
//! its own browser and web search tools.

mod parse;
mod prompts;

pub use parse::scan_license_lines;

use crate::analyzer::{AnalyzerError, ChatBackend, RetryingAnalyzer};
use crate::extract::{LicenseFinding, PlaceMetadata, TemporalMetadata};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Tools the service may use while researching
pub const RESEARCH_TOOLS: &[&str] = &["browser_automation", "web_search"];

/// Which metadata a research query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchMode {
    License,
    Place,
    Temporal,
    All,
}

impl ResearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Place => "place",
            Self::Temporal => "temporal",
            Self::All => "all",
        }
    }

    fn query(&self, url: &str) -> String {
        match self {
            Self::License => prompts::license_query(url),
            Self::Place => prompts::place_query(url),
            Self::Temporal => prompts::temporal_query(url),
            Self::All => prompts::all_query(url),
        }
    }
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "license" => Ok(Self::License),
            "place" => Ok(Self::Place),
            "temporal" => Ok(Self::Temporal),
            "all" => Ok(Self::All),
            other => Err(format!("Unknown research mode: {}", other)),
        }
    }
}

/// Result of one research query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResearchOutcome {
    pub success: bool,
    pub content: Option<String>,
    pub reasoning: Option<String>,
    pub executed_tools: Vec<serde_json::Value>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_data: Option<LicenseFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_data: Option<PlaceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_data: Option<TemporalMetadata>,
}

impl ResearchOutcome {
    fn failed(error: String) -> Self {
        Self {
            errors: vec![error],
            ..Default::default()
        }
    }
}

/// Runs research queries through a retrying analyzer
pub struct SiteResearcher<B> {
    analyzer: RetryingAnalyzer<B>,
}

impl<B: ChatBackend> SiteResearcher<B> {
    pub fn new(analyzer: RetryingAnalyzer<B>) -> Self {
        Self { analyzer }
    }

    /// Asks the service to research `url` for the metadata `mode` names
    ///
    /// Never fails; analyzer errors are reported in `errors` with
    /// `success == false`.
    pub async fn research(&self, url: &str, mode: ResearchMode) -> ResearchOutcome {
        let request = self
            .analyzer
            .settings()
            .request(mode.query(url))
            .with_compound_tools(RESEARCH_TOOLS);

        tracing::info!("Researching {} metadata for {}", mode, url);
        let completion = match self
            .analyzer
            .call_with_retry(&request, self.analyzer.max_retries())
            .await
        {
            Ok(completion) => completion,
            Err(AnalyzerError::Authentication(message)) => {
                tracing::error!("Research rejected: {}", message);
                return ResearchOutcome::failed(format!("Authentication error: {}", message));
            }
            Err(e) => {
                tracing::warn!("Research for {} failed: {}", url, e);
                return ResearchOutcome::failed(e.to_string());
            }
        };

        tracing::debug!(
            "Research for {} used {} tool sessions",
            url,
            completion.executed_tools.len()
        );

        let content = completion.content;
        let mut outcome = ResearchOutcome {
            success: true,
            reasoning: completion.reasoning,
            executed_tools: completion.executed_tools,
            ..Default::default()
        };

        match mode {
            ResearchMode::License => {
                outcome.license_data = Some(parse::parse_license(&content, None));
            }
            ResearchMode::Place => {
                outcome.place_data = Some(parse::decode_section(&content, None).unwrap_or_default());
            }
            ResearchMode::Temporal => {
                outcome.temporal_data =
                    Some(parse::decode_section(&content, None).unwrap_or_default());
            }
            ResearchMode::All => {
                outcome.license_data = Some(parse::parse_license(&content, Some("license")));
                outcome.place_data =
                    Some(parse::decode_section(&content, Some("place")).unwrap_or_default());
                outcome.temporal_data =
                    Some(parse::decode_section(&content, Some("temporal")).unwrap_or_default());
            }
        }

        outcome.content = Some(content);
        outcome
    }
}
