pub mod asset_queries;
pub mod price_queries;
pub mod snapshot_queries;
pub mod transaction_queries;
