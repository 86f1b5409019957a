pub mod dashboard;
pub mod flows;
pub mod health;
pub mod ingest;
pub mod metrics;
pub mod trades;
pub mod wallets;
