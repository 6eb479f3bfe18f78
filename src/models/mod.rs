mod asset;
mod performance;
mod price;
mod snapshot;
mod transaction;

pub use asset::{Asset, AssetType, CreateAsset, UpdateAsset};
pub use performance::{AssetOverview, AssetPerformance};
pub use price::{PriceCacheEntry, PricePair};
pub use snapshot::PortfolioSnapshot;
pub use transaction::{CreateTransaction, Transaction, TxnType};
