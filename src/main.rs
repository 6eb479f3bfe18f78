use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use nivesh_backend::app;
use nivesh_backend::external::mock::MockProvider;
use nivesh_backend::external::quote_provider::QuoteProvider;
use nivesh_backend::external::router::MarketDataRouter;
use nivesh_backend::logging::{init_logging, LoggingConfig};
use nivesh_backend::services::job_scheduler_service::{JobContext, JobSchedulerService};
use nivesh_backend::services::pricing::PriceCache;
use nivesh_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // PRICE_PROVIDER selects the quote source (defaults to the real markets)
    let provider_name =
        std::env::var("PRICE_PROVIDER").unwrap_or_else(|_| "markets".to_string());

    let quotes: Arc<dyn QuoteProvider> = match provider_name.to_lowercase().as_str() {
        "markets" => {
            tracing::info!("Using quote sources: CoinGecko + Yahoo + AMFI");
            Arc::new(MarketDataRouter::new())
        }
        "mock" => {
            tracing::info!("Using quote source: mock (random walk)");
            Arc::new(MockProvider::new())
        }
        other => anyhow::bail!("Invalid PRICE_PROVIDER: {}. Must be 'markets' or 'mock'", other),
    };

    let price_cache = PriceCache::new();

    let mut scheduler = JobSchedulerService::new(JobContext {
        pool: pool.clone(),
        quotes: quotes.clone(),
        price_cache: price_cache.clone(),
    })
    .await
    .map_err(|e| anyhow::anyhow!("scheduler setup failed: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("scheduler start failed: {}", e))?;

    let state = AppState {
        pool,
        quotes,
        price_cache,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Nivesh backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
