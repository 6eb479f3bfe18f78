use tracing::info;

use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use crate::services::pricing;

/// Refresh market quotes for every symbol any user holds. Entries still
/// inside their TTL are skipped; individual fetch failures keep the last
/// known value serving and only bump the failure count.
pub async fn refresh_all_prices(ctx: JobContext) -> Result<JobResult, AppError> {
    let summary =
        pricing::refresh_prices(&ctx.pool, &ctx.price_cache, ctx.quotes.as_ref(), false).await?;

    info!(
        "Price refresh job: {} refreshed, {} skipped (fresh), {} failed",
        summary.refreshed, summary.skipped, summary.failed
    );

    Ok(JobResult {
        items_processed: summary.refreshed + summary.skipped,
        items_failed: summary.failed,
    })
}
