//! AI Gateway — the three remote operations the workflow depends on.
//!
//! `AiGateway` is the seam: the workflow holds an `Arc<dyn AiGateway>` and never
//! sees transport or response-shape details. `GeminiGateway` is the production
//! backend; tests substitute a scripted fake.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::prompts::{ANALYZE_PROMPT, EXTRACT_PROMPT, TREND_SEARCH_PROMPT};
use crate::llm_client::prompts::{fill_template, FIDELITY_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::schema::{cv_analysis_schema, cv_record_schema};
use crate::llm_client::LlmClient;
use crate::models::{CvAnalysis, CvRecord, TargetKind, TrendSummary, UserContext};

pub mod prompts;

/// Fast model for search and extraction.
pub const FAST_MODEL: &str = "gemini-3-flash-preview";
/// Stronger model for the rewrite.
pub const ANALYSIS_MODEL: &str = "gemini-3.1-pro-preview";

pub const MISSING_INPUT_MESSAGE: &str = "missing CV input";

#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Searches the web for what recruiters want in `domain` for `target` roles.
    async fn fetch_trends(
        &self,
        domain: &str,
        target: TargetKind,
    ) -> Result<TrendSummary, AppError>;

    /// Turns pasted CV text into a structured record.
    async fn extract_record(&self, raw_text: &str) -> Result<CvRecord, AppError>;

    /// Scores the record against the trends and rewrites it.
    async fn analyze_and_rewrite(
        &self,
        record: &CvRecord,
        context: &UserContext,
        trends: &TrendSummary,
    ) -> Result<CvAnalysis, AppError>;
}

/// Rejects blank input before anything leaves the process.
pub fn ensure_raw_input(raw_text: &str) -> Result<(), AppError> {
    if raw_text.trim().is_empty() {
        return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    }
    Ok(())
}

pub struct GeminiGateway {
    llm: LlmClient,
}

impl GeminiGateway {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn fetch_trends(
        &self,
        domain: &str,
        target: TargetKind,
    ) -> Result<TrendSummary, AppError> {
        let prompt = build_trend_prompt(domain, target, Utc::now().year());
        info!("Searching CV trends for {target} in {domain}");

        let text = self
            .llm
            .generate_text(FAST_MODEL, &prompt, true)
            .await
            .map_err(|e| AppError::Upstream(format!("Trend search failed: {e}")))?;

        TrendSummary::new(text)
            .ok_or_else(|| AppError::Upstream("Trend search returned no text".to_string()))
    }

    async fn extract_record(&self, raw_text: &str) -> Result<CvRecord, AppError> {
        ensure_raw_input(raw_text)?;

        let prompt = build_extract_prompt(raw_text);
        info!("Extracting CV record from {} chars of input", raw_text.len());

        let record: CvRecord = self
            .llm
            .generate_json(FAST_MODEL, &prompt, &cv_record_schema())
            .await
            .map_err(AppError::from)?;

        Ok(record.normalized())
    }

    async fn analyze_and_rewrite(
        &self,
        record: &CvRecord,
        context: &UserContext,
        trends: &TrendSummary,
    ) -> Result<CvAnalysis, AppError> {
        let prompt = build_analysis_prompt(record, context, trends)?;
        info!("Analyzing CV for {} ({})", context.domain, context.target);

        let mut analysis: CvAnalysis = self
            .llm
            .generate_json(ANALYSIS_MODEL, &prompt, &cv_analysis_schema())
            .await
            .map_err(AppError::from)?;

        if analysis.suggestions.is_empty() {
            warn!("Analysis returned no suggestions");
        }
        analysis.improved_cv.normalize();
        Ok(analysis)
    }
}

fn build_trend_prompt(domain: &str, target: TargetKind, year: i32) -> String {
    let years = format!("{}-{}", year, year + 1);
    fill_template(
        TREND_SEARCH_PROMPT,
        &[
            ("target", target.as_str()),
            ("domain", domain.trim()),
            ("years", &years),
        ],
    )
}

fn build_extract_prompt(raw_text: &str) -> String {
    fill_template(
        EXTRACT_PROMPT,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("raw_text", raw_text)],
    )
}

fn build_analysis_prompt(
    record: &CvRecord,
    context: &UserContext,
    trends: &TrendSummary,
) -> Result<String, AppError> {
    let cv_json = serde_json::to_string_pretty(record)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize CV record: {e}")))?;

    Ok(fill_template(
        ANALYZE_PROMPT,
        &[
            ("domain", context.domain.trim()),
            ("target", context.target.as_str()),
            ("duration", context.duration.as_str()),
            ("additional_info", context.additional_info.trim()),
            ("trends", trends.as_str()),
            ("cv_json", &cv_json),
            ("fidelity", FIDELITY_INSTRUCTION),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Engagement, PersonalInfo};

    fn sample_record() -> CvRecord {
        CvRecord {
            personal_info: PersonalInfo {
                full_name: "Sam Doe".into(),
                email: "sam@example.com".into(),
                summary: "Backend engineer".into(),
                ..Default::default()
            },
            skills: vec!["Python".into(), "Go".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_ensure_raw_input_rejects_whitespace() {
        let err = ensure_raw_input(" \n\t ").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == MISSING_INPUT_MESSAGE));
        assert!(ensure_raw_input("5 years at Acme").is_ok());
    }

    #[tokio::test]
    async fn test_extract_record_validates_before_network() {
        // Unroutable base URL: reaching the network would yield Upstream, not Validation.
        let llm = LlmClient::new("key".into(), "http://127.0.0.1:9".into()).unwrap();
        let gateway = GeminiGateway::new(llm);
        let err = gateway.extract_record("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_fetch_trends_transport_failure_is_upstream() {
        let llm = LlmClient::new("key".into(), "http://127.0.0.1:9".into()).unwrap();
        let gateway = GeminiGateway::new(llm);
        let err = gateway
            .fetch_trends("Fintech", TargetKind::Job)
            .await
            .unwrap_err();
        match err {
            AppError::Upstream(message) => assert!(message.starts_with("Trend search failed")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_trend_prompt_names_target_domain_and_years() {
        let prompt = build_trend_prompt(" Fintech ", TargetKind::Job, 2026);
        assert!(prompt.contains("for a job position in the Fintech domain"));
        assert!(prompt.contains("2026-2027"));
    }

    #[test]
    fn test_extract_prompt_embeds_raw_text() {
        let prompt = build_extract_prompt("5 years as backend engineer at Acme");
        assert!(prompt.ends_with("5 years as backend engineer at Acme"));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_analysis_prompt_embeds_all_four_inputs() {
        let context = UserContext::new("Fintech", TargetKind::Contract, Engagement::ShortTerm)
            .with_additional_info("Prefers Berlin");
        let trends = TrendSummary::new("Recruiters want Kafka and PCI-DSS").unwrap();
        let prompt = build_analysis_prompt(&sample_record(), &context, &trends).unwrap();

        assert!(prompt.contains("- Domain: Fintech"));
        assert!(prompt.contains("- Target: contract"));
        assert!(prompt.contains("- Duration: short-term"));
        assert!(prompt.contains("- Additional Info: Prefers Berlin"));
        assert!(prompt.contains("Recruiters want Kafka and PCI-DSS"));
        assert!(prompt.contains("\"fullName\": \"Sam Doe\""));
        assert!(!prompt.contains("{json_only}"));
    }

    #[test]
    fn test_analysis_prompt_does_not_expand_placeholders_in_user_text() {
        let context = UserContext::new("{trends}", TargetKind::Job, Engagement::LongTerm);
        let trends = TrendSummary::new("TRENDS").unwrap();
        let prompt = build_analysis_prompt(&sample_record(), &context, &trends).unwrap();
        assert!(prompt.contains("- Domain: {trends}"));
    }
}
