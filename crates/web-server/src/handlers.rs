use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use core_types::{Account, Quote, TransactionRecord};
use ledger::{DeclineReason, PortfolioPosition, TradeOutcome};
use oracle::PriceOracle;
use rust_decimal::Decimal;
use store::AccountDirectory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub account_id: Uuid,
    pub symbol: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub account_id: Uuid,
    pub symbol: String,
    pub quantity: i64,
    /// Handle of the registered account buying the shares.
    pub buyer_handle: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub handle: String,
    pub email: String,
}

/// The uniform payload for buy and sell responses. Declined trades use the
/// same shape with `success = false` and a human-readable reason.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub success: bool,
    pub message: String,
    pub symbol: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
}

impl TradeResponse {
    fn from_outcome(outcome: TradeOutcome, symbol: &str, quantity: i64) -> Self {
        match outcome {
            TradeOutcome::Executed(receipt) => {
                let message = match &receipt.counterparty {
                    Some(buyer) => format!(
                        "Stock sold successfully to {buyer}. Stocks transferred to buyer's portfolio."
                    ),
                    None => "Stock purchased successfully".to_string(),
                };
                Self {
                    success: true,
                    message,
                    symbol: Some(receipt.symbol),
                    quantity: Some(receipt.quantity),
                    price: Some(receipt.price),
                    total_amount: Some(receipt.total_amount),
                    balance: Some(receipt.new_balance),
                    counterparty: receipt.counterparty,
                }
            }
            TradeOutcome::Declined { reason, balance } => {
                // Funding declines still carry the amount the trade would
                // have cost; the other declines carry no price context.
                let total_amount = match &reason {
                    DeclineReason::InsufficientFunds { required, .. } => Some(*required),
                    _ => None,
                };
                Self {
                    success: false,
                    message: reason.message(),
                    symbol: Some(symbol.to_uppercase()),
                    quantity: Some(quantity),
                    price: None,
                    total_amount,
                    balance: Some(balance),
                    counterparty: None,
                }
            }
        }
    }
}

/// # POST /api/trading/buy
/// Purchases stock at the current quote, debiting the account's balance.
pub async fn buy_stock(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeResponse>, AppError> {
    let outcome = state
        .ledger
        .buy(request.account_id, &request.symbol, request.quantity)
        .await?;
    Ok(Json(TradeResponse::from_outcome(
        outcome,
        &request.symbol,
        request.quantity,
    )))
}

/// # POST /api/trading/sell
/// Peer-to-peer transfer: sells stock out of the seller's portfolio to a
/// named, registered buyer who pays for it.
pub async fn sell_stock(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SellRequest>,
) -> Result<Json<TradeResponse>, AppError> {
    let outcome = state
        .ledger
        .sell_to_peer(
            request.account_id,
            &request.symbol,
            request.quantity,
            &request.buyer_handle,
        )
        .await?;
    Ok(Json(TradeResponse::from_outcome(
        outcome,
        &request.symbol,
        request.quantity,
    )))
}

/// # GET /api/trading/portfolio/:account_id
/// All holdings of the account valued at the current market price.
pub async fn get_portfolio(
    Path(account_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PortfolioPosition>>, AppError> {
    let positions = state.ledger.portfolio(account_id).await?;
    Ok(Json(positions))
}

/// # GET /api/trading/transactions/:account_id
/// The account's journal entries, newest first.
pub async fn get_transactions(
    Path(account_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let records = state.ledger.transactions(account_id).await?;
    Ok(Json(records))
}

/// # GET /api/stocks/quote/:symbol
/// Current quote for a symbol, live or synthetic depending on availability.
pub async fn get_quote(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Quote>, AppError> {
    let quote = state
        .oracle
        .quote(&symbol)
        .await
        .map_err(ledger::LedgerError::from)?;
    Ok(Json(quote))
}

/// # POST /api/accounts/register
/// Creates a new account seeded with the configured initial balance.
pub async fn register_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .directory
        .register(Account::new(
            request.handle,
            request.email,
            state.initial_balance,
        ))
        .await?;
    tracing::info!(account_id = %account.id, handle = %account.handle, "Account registered.");
    Ok((StatusCode::CREATED, Json(account)))
}

/// # GET /api/accounts/:id
pub async fn get_account(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .directory
        .find_by_id(id)
        .await
        .map_err(AppError::Store)?
        .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))?;
    Ok(Json(account))
}

/// # GET /api/accounts/handle/:handle
pub async fn get_account_by_handle(
    Path(handle): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .directory
        .find_by_handle(&handle)
        .await
        .map_err(AppError::Store)?
        .ok_or_else(|| AppError::NotFound(format!("Account '{handle}' not found")))?;
    Ok(Json(account))
}

/// # GET /api/accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = state.directory.all().await.map_err(AppError::Store)?;
    Ok(Json(accounts))
}

/// # DELETE /api/accounts/:id
/// Refused while the account still owns holdings.
pub async fn delete_account(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.directory.delete(id).await.map_err(AppError::Store)?;
    Ok(Json(
        serde_json::json!({ "success": true, "message": "Account deleted successfully" }),
    ))
}
