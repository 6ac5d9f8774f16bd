//! Resume Analyzer: turns resume text into an `AnalysisResult`.
//!
//! Never fails: service errors, timeouts and unusable responses all collapse
//! into `AnalysisResult::fallback()`, logged at warn with `fallback = true`.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::models::{AnalysisResult, CareerDomain};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::validation::{validate_analysis, ValidationFailure};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmError, ReasoningService};

/// Why an analysis fell back. Only ever logged, never returned to callers.
#[derive(Debug, Error)]
enum AnalysisFailure {
    #[error("reasoning service error: {0}")]
    Service(#[from] LlmError),

    #[error("reasoning service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("invalid analysis: {0}")]
    Invalid(#[from] ValidationFailure),
}

pub struct ResumeAnalyzer {
    service: Arc<dyn ReasoningService>,
    timeout: Duration,
}

impl ResumeAnalyzer {
    pub fn new(service: Arc<dyn ReasoningService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub async fn analyze(&self, resume_text: &str) -> AnalysisResult {
        match self.try_analyze(resume_text).await {
            Ok(analysis) => {
                info!(
                    domain = %analysis.domain,
                    skills = analysis.skills.len(),
                    suggestions = analysis.suggestions.len(),
                    "Resume analysis validated"
                );
                analysis
            }
            Err(failure) => {
                warn!(fallback = true, reason = %failure, "AI analysis failed, using fallback analysis");
                AnalysisResult::fallback()
            }
        }
    }

    async fn try_analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisFailure> {
        let domains = CareerDomain::ALL.map(|d| d.as_str());
        let prompt = build_analysis_prompt(resume_text, &domains);

        let raw = tokio::time::timeout(self.timeout, self.service.complete(&prompt, JSON_ONLY_SYSTEM))
            .await
            .map_err(|_| AnalysisFailure::Timeout(self.timeout))??;

        Ok(validate_analysis(&raw)?)
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::testing::FakeReasoning;
    use super::*;

    fn analyzer(service: FakeReasoning) -> (ResumeAnalyzer, Arc<FakeReasoning>) {
        let service = Arc::new(service);
        (
            ResumeAnalyzer::new(service.clone(), Duration::from_secs(5)),
            service,
        )
    }

    #[tokio::test]
    async fn test_valid_response_is_returned() {
        let (analyzer, service) = analyzer(FakeReasoning::replying(
            r#"Here you go: {"domain":"Data Science","skills":["Python","SQL"],"suggestions":["Add a portfolio"]}"#,
        ));

        let analysis = analyzer.analyze("Data analyst with Python and SQL").await;

        assert_eq!(analysis.domain, CareerDomain::DataScience);
        assert_eq!(analysis.skills, vec!["Python", "SQL"]);
        assert!(!analysis.is_fallback());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_resume_and_domains() {
        let (analyzer, service) = analyzer(FakeReasoning::replying("{}"));
        analyzer.analyze("Kubernetes operator at ACME").await;

        let prompt = service.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Kubernetes operator at ACME"));
        for domain in CareerDomain::ALL {
            assert!(prompt.contains(domain.as_str()));
        }
    }

    #[tokio::test]
    async fn test_prose_response_falls_back() {
        let (analyzer, _) = analyzer(FakeReasoning::replying("I cannot help with that."));
        let analysis = analyzer.analyze("resume").await;
        assert_eq!(analysis, AnalysisResult::fallback());
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let (analyzer, _) = analyzer(FakeReasoning::failing(503));
        let analysis = analyzer.analyze("resume").await;
        assert_eq!(analysis.domain, CareerDomain::SoftwareDevelopment);
        assert_eq!(analysis.skills, vec!["AI Analysis Error"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let service = Arc::new(FakeReasoning::slow(
            r#"{"domain":"Data Science","skills":[],"suggestions":[]}"#,
            Duration::from_secs(60),
        ));
        let analyzer = ResumeAnalyzer::new(service, Duration::from_secs(1));

        let analysis = analyzer.analyze("resume").await;

        assert!(analysis.is_fallback());
    }

    #[tokio::test]
    async fn test_unknown_domain_falls_back() {
        let (analyzer, _) = analyzer(FakeReasoning::replying(
            r#"{"domain":"Astrophysics","skills":["Telescopes"],"suggestions":[]}"#,
        ));
        assert!(analyzer.analyze("resume").await.is_fallback());
    }
}
