pub mod asset_service;
pub mod job_scheduler_service;
pub mod performance;
pub mod pricing;
pub mod snapshot_service;
pub mod transaction_service;
