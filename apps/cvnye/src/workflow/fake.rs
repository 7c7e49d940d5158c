//! Scripted in-memory gateway for workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::gateway::{ensure_raw_input, AiGateway};
use crate::models::{
    CvAnalysis, CvRecord, Engagement, Experience, PersonalInfo, TargetKind, TrendSummary,
    UserContext,
};

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Succeed,
    SucceedAfter(Duration),
    Fail,
    FailAfter(Duration),
}

impl Outcome {
    async fn settle(self) -> bool {
        match self {
            Outcome::Succeed => true,
            Outcome::Fail => false,
            Outcome::SucceedAfter(delay) => {
                tokio::time::sleep(delay).await;
                true
            }
            Outcome::FailAfter(delay) => {
                tokio::time::sleep(delay).await;
                false
            }
        }
    }
}

pub struct FakeGateway {
    trends: Outcome,
    extract: Outcome,
    analyze: Outcome,
    trend_calls: AtomicUsize,
    extract_calls: AtomicUsize,
    analyze_calls: AtomicUsize,
    analysis_inputs: Mutex<Option<(String, String)>>,
}

impl FakeGateway {
    pub fn succeeding() -> Self {
        Self {
            trends: Outcome::Succeed,
            extract: Outcome::Succeed,
            analyze: Outcome::Succeed,
            trend_calls: AtomicUsize::new(0),
            extract_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
            analysis_inputs: Mutex::new(None),
        }
    }

    pub fn with_trends(mut self, outcome: Outcome) -> Self {
        self.trends = outcome;
        self
    }

    pub fn with_extract(mut self, outcome: Outcome) -> Self {
        self.extract = outcome;
        self
    }

    pub fn with_analyze(mut self, outcome: Outcome) -> Self {
        self.analyze = outcome;
        self
    }

    pub fn trend_calls(&self) -> usize {
        self.trend_calls.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.trend_calls() + self.extract_calls() + self.analyze_calls()
    }

    /// Full name of the record and the trend text the last analysis call received.
    pub fn last_analysis_inputs(&self) -> Option<(String, String)> {
        self.analysis_inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiGateway for FakeGateway {
    async fn fetch_trends(
        &self,
        _domain: &str,
        _target: TargetKind,
    ) -> Result<TrendSummary, AppError> {
        self.trend_calls.fetch_add(1, Ordering::SeqCst);
        if self.trends.settle().await {
            Ok(TrendSummary::new(sample_trends()).unwrap())
        } else {
            Err(AppError::Upstream("search backend unavailable".to_string()))
        }
    }

    async fn extract_record(&self, raw_text: &str) -> Result<CvRecord, AppError> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        ensure_raw_input(raw_text)?;
        if self.extract.settle().await {
            Ok(sample_record())
        } else {
            Err(AppError::MalformedResponse("missing field `fullName`".to_string()))
        }
    }

    async fn analyze_and_rewrite(
        &self,
        record: &CvRecord,
        _context: &UserContext,
        trends: &TrendSummary,
    ) -> Result<CvAnalysis, AppError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        *self.analysis_inputs.lock().unwrap() = Some((
            record.personal_info.full_name.clone(),
            trends.as_str().to_string(),
        ));
        if self.analyze.settle().await {
            Ok(sample_analysis())
        } else {
            Err(AppError::MalformedResponse(String::new()))
        }
    }
}

pub fn sample_context() -> UserContext {
    UserContext::new("Fintech", TargetKind::Job, Engagement::LongTerm)
}

pub fn sample_trends() -> &'static str {
    "Fintech recruiters want Kafka, Go and PCI-DSS experience."
}

pub fn sample_record() -> CvRecord {
    CvRecord {
        personal_info: PersonalInfo {
            full_name: "Sam Doe".into(),
            email: "sam@example.com".into(),
            phone: "+33 6 12 34 56 78".into(),
            location: "Paris, France".into(),
            summary: "Backend engineer with 5 years at Acme.".into(),
            ..Default::default()
        },
        experiences: vec![Experience {
            id: "exp-1".into(),
            company: "Acme".into(),
            position: "Backend Engineer".into(),
            location: "Paris".into(),
            start_date: "2019".into(),
            end_date: "2024".into(),
            description: vec!["Built services in Python and Go".into()],
        }],
        skills: vec!["Python".into(), "Go".into()],
        ..Default::default()
    }
}

pub fn sample_analysis() -> CvAnalysis {
    let mut improved = sample_record();
    improved.personal_info.summary =
        "Backend engineer shipping payment services in Go and Python for 5 years.".into();
    improved.skills.push("Kafka".into());
    CvAnalysis {
        suggestions: vec!["Quantify the latency gains from the Acme migration".into()],
        keywords: vec!["Kafka".into(), "PCI-DSS".into()],
        improved_cv: improved,
    }
}
