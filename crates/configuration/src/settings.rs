use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub oracle: Oracle,
    pub accounts: Accounts,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// The socket address the API listens on (e.g., "127.0.0.1:8080").
    pub bind_addr: String,
}

/// Contains parameters for the price oracle.
#[derive(Debug, Clone, Deserialize)]
pub struct Oracle {
    /// Base URL of the upstream quote API.
    pub base_url: String,
    /// API key for the upstream quote API. When absent, quotes are served
    /// from the synthetic generator without ever attempting a live call.
    pub api_key: Option<String>,
    /// Upper bound on a live quote request before falling back, in milliseconds.
    pub request_timeout_ms: u64,
}

/// Contains parameters for account registration.
#[derive(Debug, Clone, Deserialize)]
pub struct Accounts {
    /// The cash balance seeded into every newly registered account.
    pub initial_balance: Decimal,
}
