pub mod amfi;
pub mod coingecko;
pub mod mock;
pub mod quote_provider;
pub mod router;
pub mod yahoo;
