use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use configuration::Settings;
use ledger::Ledger;
use oracle::{FailoverOracle, PriceOracle};
use rust_decimal::Decimal;
use store::{AccountDirectory, MemoryStore};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub ledger: Ledger,
    pub directory: Arc<dyn AccountDirectory>,
    pub oracle: Arc<dyn PriceOracle>,
    pub initial_balance: Decimal,
}

/// Wires the store, oracle, and ledger together from the settings.
pub fn build_state(settings: &Settings) -> Arc<AppState> {
    let store = Arc::new(MemoryStore::new());
    let oracle: Arc<dyn PriceOracle> = Arc::new(FailoverOracle::from_settings(&settings.oracle));

    let ledger = Ledger::new(
        store.clone(),
        store.clone(),
        store.clone(),
        oracle.clone(),
    );

    Arc::new(AppState {
        ledger,
        directory: store,
        oracle,
        initial_balance: settings.accounts.initial_balance,
    })
}

/// Builds the application router with every route and middleware layer.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/trading/buy", post(handlers::buy_stock))
        .route("/api/trading/sell", post(handlers::sell_stock))
        .route("/api/trading/portfolio/:account_id", get(handlers::get_portfolio))
        .route("/api/trading/transactions/:account_id", get(handlers::get_transactions))
        .route("/api/stocks/quote/:symbol", get(handlers::get_quote))
        .route("/api/accounts/register", post(handlers::register_account))
        .route("/api/accounts", get(handlers::list_accounts))
        .route(
            "/api/accounts/:id",
            get(handlers::get_account).delete(handlers::delete_account),
        )
        .route("/api/accounts/handle/:handle", get(handlers::get_account_by_handle))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr: SocketAddr = settings.server.bind_addr.parse()?;
    let state = build_state(&settings);
    let app = router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
