//! Workflow orchestrator — the linear builder state machine.
//!
//! welcome → context → input → processing → review, with processing falling
//! back to input on any failure. `generate` takes `&mut self`, so at most one
//! pipeline run can be in flight per workflow.

pub mod pipeline;
pub mod progress;

#[cfg(test)]
pub mod fake;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::{AiGateway, MISSING_INPUT_MESSAGE};
use crate::models::{CvAnalysis, CvRecord, UserContext};
use crate::render::Template;
use crate::workflow::pipeline::run_pipeline;
use crate::workflow::progress::{ProgressTracker, PROGRESS_COMPLETE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Welcome,
    Context,
    Input,
    Processing,
    Review,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Welcome => "welcome",
            WorkflowState::Context => "context",
            WorkflowState::Input => "input",
            WorkflowState::Processing => "processing",
            WorkflowState::Review => "review",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the review screen needs. Only exists when both halves are present.
#[derive(Debug, Clone, Copy)]
pub struct ReviewView<'a> {
    pub record: &'a CvRecord,
    pub analysis: &'a CvAnalysis,
    pub template: Template,
}

pub struct Workflow {
    gateway: Arc<dyn AiGateway>,
    state: WorkflowState,
    context: Option<UserContext>,
    raw_input: String,
    record: Option<CvRecord>,
    analysis: Option<CvAnalysis>,
    error: Option<String>,
    progress: ProgressTracker,
    settle_delay: Duration,
    template: Template,
}

impl Workflow {
    pub fn new(gateway: Arc<dyn AiGateway>, settle_delay: Duration) -> Self {
        Self {
            gateway,
            state: WorkflowState::Welcome,
            context: None,
            raw_input: String::new(),
            record: None,
            analysis: None,
            error: None,
            progress: ProgressTracker::new(),
            settle_delay,
            template: Template::default(),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn context(&self) -> Option<&UserContext> {
        self.context.as_ref()
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Inline message from the last failed run, cleared when a new run starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> u8 {
        self.progress.current()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn template(&self) -> Template {
        self.template
    }

    fn expect_state(&self, expected: WorkflowState, action: &'static str) -> Result<(), AppError> {
        if self.state != expected {
            return Err(AppError::InvalidTransition {
                from: self.state.as_str(),
                action,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: WorkflowState) {
        info!("Workflow {} → {}", self.state, to);
        self.state = to;
    }

    /// welcome → context
    pub fn start(&mut self) -> Result<(), AppError> {
        self.expect_state(WorkflowState::Welcome, "start")?;
        self.transition(WorkflowState::Context);
        Ok(())
    }

    /// context → input
    pub fn submit_context(&mut self, context: UserContext) -> Result<(), AppError> {
        self.expect_state(WorkflowState::Context, "submit context")?;
        context.validate()?;
        self.context = Some(context);
        self.transition(WorkflowState::Input);
        Ok(())
    }

    pub fn set_raw_input(&mut self, text: impl Into<String>) -> Result<(), AppError> {
        self.expect_state(WorkflowState::Input, "edit the CV text")?;
        self.raw_input = text.into();
        Ok(())
    }

    /// Whether the generate action is offered at all.
    pub fn can_generate(&self) -> bool {
        self.state == WorkflowState::Input && !self.raw_input.trim().is_empty()
    }

    /// input → processing → review, or back to input on failure.
    ///
    /// Refused without touching state or the network when generation is not
    /// offered. On failure the raw input is kept, the message is stored for
    /// `error()` and progress goes back to zero.
    pub async fn generate(&mut self) -> Result<&CvAnalysis, AppError> {
        self.expect_state(WorkflowState::Input, "generate")?;
        if !self.can_generate() {
            return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }
        let context = self.context.clone().ok_or(AppError::InvalidTransition {
            from: "input",
            action: "generate without a submitted context",
        })?;

        self.error = None;
        self.progress.reset();
        self.transition(WorkflowState::Processing);

        let result = run_pipeline(
            self.gateway.as_ref(),
            &context,
            &self.raw_input,
            &self.progress,
        )
        .await;

        match result {
            Ok(analysis) => {
                self.progress.raise_to(PROGRESS_COMPLETE);
                tokio::time::sleep(self.settle_delay).await;

                // Record and analysis land together, after the last await.
                self.record = Some(analysis.improved_cv.clone());
                self.transition(WorkflowState::Review);
                Ok(&*self.analysis.insert(analysis))
            }
            Err(err) => {
                let message = err.user_message();
                warn!("Pipeline failed: {message}");
                self.error = Some(message);
                self.transition(WorkflowState::Input);
                self.progress.reset();
                Err(err)
            }
        }
    }

    /// The review content, or `None` unless in review with both record and analysis.
    pub fn review(&self) -> Option<ReviewView<'_>> {
        if self.state != WorkflowState::Review {
            return None;
        }
        match (&self.record, &self.analysis) {
            (Some(record), Some(analysis)) => Some(ReviewView {
                record,
                analysis,
                template: self.template,
            }),
            _ => None,
        }
    }

    pub fn select_template(&mut self, template: Template) {
        self.template = template;
    }

    /// input → context, keeping the submitted context and the raw text.
    pub fn back_to_context(&mut self) -> Result<(), AppError> {
        self.expect_state(WorkflowState::Input, "go back to the context form")?;
        self.error = None;
        self.transition(WorkflowState::Context);
        Ok(())
    }

    /// review → input, keeping the raw text for another pass.
    pub fn edit_input(&mut self) -> Result<(), AppError> {
        self.expect_state(WorkflowState::Review, "edit the CV text")?;
        self.record = None;
        self.analysis = None;
        self.progress.reset();
        self.transition(WorkflowState::Input);
        Ok(())
    }

    /// Back to welcome with nothing retained, from any state.
    ///
    /// A workflow only sits in processing here if a `generate` future was
    /// dropped before it finished; that run is abandoned.
    pub fn reset(&mut self) {
        if self.state == WorkflowState::Processing {
            warn!("Abandoning an unfinished run");
        }
        self.context = None;
        self.raw_input.clear();
        self.record = None;
        self.analysis = None;
        self.error = None;
        self.progress.reset();
        self.transition(WorkflowState::Welcome);
    }
}
