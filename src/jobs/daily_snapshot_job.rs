use tracing::{error, info};

use crate::db;
use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use crate::services::snapshot_service;

/// Nightly net-worth snapshot for every user with at least one transaction.
/// Each user's run backfills missing days first, then writes today's row;
/// one user's failure never stops the rest.
pub async fn create_all_daily_snapshots(ctx: JobContext) -> Result<JobResult, AppError> {
    let users = db::transaction_queries::distinct_user_ids(&ctx.pool).await?;

    if users.is_empty() {
        info!("No users with transactions, nothing to snapshot");
        return Ok(JobResult {
            items_processed: 0,
            items_failed: 0,
        });
    }

    info!("Creating daily snapshots for {} user(s)", users.len());

    let mut processed = 0;
    let mut failed = 0;

    for user_id in users {
        match snapshot_service::try_create_daily_snapshot(&ctx.pool, &ctx.price_cache, user_id)
            .await
        {
            Ok(()) => processed += 1,
            Err(e) => {
                error!("Snapshot failed for user {}: {}", user_id, e);
                failed += 1;
            }
        }
    }

    info!(
        "Daily snapshot job completed: {} users processed, {} failed",
        processed, failed
    );

    Ok(JobResult {
        items_processed: processed,
        items_failed: failed,
    })
}
