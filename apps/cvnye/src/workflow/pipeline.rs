//! Processing pipeline — raw text and context in, analysis out.
//!
//! Flow: (fetch_trends ‖ extract_record) → analyze_and_rewrite.
//!
//! The two first calls run concurrently and are joined fail-fast: the first
//! error drops the other future and the rewrite is never started. The rewrite
//! only runs once BOTH inputs are in hand.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::gateway::AiGateway;
use crate::models::{CvAnalysis, UserContext};
use crate::workflow::progress::{
    ProgressTracker, PROGRESS_ANALYZED, PROGRESS_ANALYZING, PROGRESS_DISPATCHED,
    PROGRESS_RECORD_DONE, PROGRESS_START, PROGRESS_TRENDS_DONE,
};

/// Runs the pipeline up to (not including) storing the result.
/// Leaves progress at `PROGRESS_ANALYZED` on success; the caller finishes it.
pub async fn run_pipeline(
    gateway: &dyn AiGateway,
    context: &UserContext,
    raw_input: &str,
    progress: &ProgressTracker,
) -> Result<CvAnalysis, AppError> {
    progress.raise_to(PROGRESS_START);
    progress.raise_to(PROGRESS_DISPATCHED);

    let trends_call = async {
        let trends = gateway.fetch_trends(&context.domain, context.target).await?;
        progress.raise_to(PROGRESS_TRENDS_DONE);
        debug!("Trend summary received ({} chars)", trends.as_str().len());
        Ok::<_, AppError>(trends)
    };

    let extract_call = async {
        let record = gateway.extract_record(raw_input).await?;
        progress.raise_to(PROGRESS_RECORD_DONE);
        debug!(
            "Record extracted: {} experiences, {} education entries",
            record.experiences.len(),
            record.education.len()
        );
        Ok::<_, AppError>(record)
    };

    let (trends, record) = tokio::try_join!(trends_call, extract_call)?;

    progress.raise_to(PROGRESS_ANALYZING);
    info!("Both inputs ready, starting analysis");

    let analysis = gateway
        .analyze_and_rewrite(&record, context, &trends)
        .await?;

    progress.raise_to(PROGRESS_ANALYZED);
    Ok(analysis)
}
