use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::jobs::{daily_snapshot_job, price_refresh_job};
use crate::services::pricing::PriceCache;

// Context passed to job functions
#[derive(Clone)]
pub struct JobContext {
    pub pool: PgPool,
    pub quotes: Arc<dyn QuoteProvider>,
    pub price_cache: PriceCache,
}

#[derive(Debug, Clone, Copy)]
pub struct JobResult {
    pub items_processed: u32,
    pub items_failed: u32,
}

pub struct JobSchedulerService {
    scheduler: JobScheduler,
    context: JobContext,
}

impl JobSchedulerService {
    pub async fn new(context: JobContext) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, context })
    }

    /// Start all scheduled jobs.
    pub async fn start(&mut self) -> Result<(), AppError> {
        info!("Starting job scheduler...");

        // Test mode tightens schedules so jobs fire within minutes
        let test_mode = std::env::var("JOB_SCHEDULER_TEST_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if test_mode {
            info!("JOB SCHEDULER IN TEST MODE - schedules are tightened!");
        }

        // Format: sec min hour day month weekday
        let refresh_schedule = if test_mode { "0 */1 * * * *" } else { "0 */5 * * * *" };
        let refresh_desc = if test_mode { "Every minute (TEST MODE)" } else { "Every 5 minutes" };

        self.schedule_job(
            refresh_schedule,
            "refresh_prices",
            refresh_desc,
            price_refresh_job::refresh_all_prices,
        )
        .await?;

        let snapshot_schedule = if test_mode { "0 */2 * * * *" } else { "0 15 0 * * *" };
        let snapshot_desc = if test_mode { "Every 2 minutes (TEST MODE)" } else { "Daily at 00:15" };

        self.schedule_job(
            snapshot_schedule,
            "daily_snapshots",
            snapshot_desc,
            daily_snapshot_job::create_all_daily_snapshots,
        )
        .await?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {}", e)))?;

        info!("Job scheduler started with 2 jobs");
        Ok(())
    }

    /// Stop the scheduler gracefully.
    #[allow(dead_code)]
    pub async fn stop(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::External(format!("Failed to stop scheduler: {}", e)))?;
        info!("Job scheduler stopped");
        Ok(())
    }

    async fn schedule_job<F, Fut>(
        &mut self,
        schedule: &str,
        job_name: &'static str,
        description: &str,
        job_fn: F,
    ) -> Result<(), AppError>
    where
        F: Fn(JobContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<JobResult, AppError>> + Send + 'static,
    {
        let context = self.context.clone();
        let job_fn = Arc::new(job_fn);

        let job = Job::new_async(schedule, move |_uuid, _l| {
            let context = context.clone();
            let job_fn = job_fn.clone();
            Box::pin(async move {
                run_job(job_name, context, job_fn).await;
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create job {}: {}", job_name, e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add job {}: {}", job_name, e)))?;

        info!("Scheduled: {} - {} [cron: {}]", job_name, description, schedule);
        Ok(())
    }
}

async fn run_job<F, Fut>(job_name: &str, context: JobContext, job_fn: Arc<F>)
where
    F: Fn(JobContext) -> Fut,
    Fut: std::future::Future<Output = Result<JobResult, AppError>>,
{
    info!("Starting job: {}", job_name);
    let started_at = Utc::now();

    let result = job_fn(context).await;
    let duration_ms = (Utc::now() - started_at).num_milliseconds();

    match result {
        Ok(job_result) => {
            info!(
                "Job completed: {} (processed: {}, failed: {}, duration: {}ms)",
                job_name, job_result.items_processed, job_result.items_failed, duration_ms
            );
        }
        Err(e) => {
            error!("Job failed: {} after {}ms: {}", job_name, duration_ms, e);
        }
    }
}
