use std::sync::Arc;

use sqlx::PgPool;

use crate::external::quote_provider::QuoteProvider;
use crate::services::pricing::PriceCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quotes: Arc<dyn QuoteProvider>,
    pub price_cache: PriceCache,
}
