//! Background jobs run by the scheduler service, independent of user
//! requests. Jobs are idempotent (safe to re-run), fault tolerant (per-item
//! failures are logged, never fatal to the run), and report processed/failed
//! counts for the scheduler's log line.

pub mod daily_snapshot_job;
pub mod price_refresh_job;
