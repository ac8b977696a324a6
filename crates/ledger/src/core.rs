use std::sync::Arc;

use chrono::Utc;
use core_types::{Holding, TradeSide, TransactionRecord};
use oracle::PriceOracle;
use rust_decimal::{Decimal, RoundingStrategy};
use store::{AccountDirectory, HoldingStore, LockRegistry, TransactionJournal};
use uuid::Uuid;

use crate::cost_basis;
use crate::error::LedgerError;
use crate::outcome::{DeclineReason, PortfolioPosition, TradeOutcome, TradeReceipt};

/// Orchestrates trade execution against the repository capabilities.
///
/// All balance and holding mutations of one trade happen while holding the
/// per-account lock(s), so concurrent trades on the same account serialize
/// and a sell's two-sided money transfer commits as a unit.
pub struct Ledger {
    directory: Arc<dyn AccountDirectory>,
    holdings: Arc<dyn HoldingStore>,
    journal: Arc<dyn TransactionJournal>,
    oracle: Arc<dyn PriceOracle>,
    locks: LockRegistry,
}

impl Ledger {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        holdings: Arc<dyn HoldingStore>,
        journal: Arc<dyn TransactionJournal>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        Self {
            directory,
            holdings,
            journal,
            oracle,
            locks: LockRegistry::new(),
        }
    }

    /// Buys `quantity` units of `symbol` from the market at the current quote.
    pub async fn buy(
        &self,
        account_id: Uuid,
        symbol: &str,
        quantity: i64,
    ) -> Result<TradeOutcome, LedgerError> {
        if quantity < 1 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }
        let symbol = symbol.to_uppercase();

        // The whole read-compute-write sequence runs under the account lock.
        let _guard = self.locks.acquire(account_id).await;

        let mut account = self
            .directory
            .find_by_id(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let quote = self.oracle.quote(&symbol).await?;
        let total_cost = quote.current_price * Decimal::from(quantity);

        if account.balance < total_cost {
            return Ok(TradeOutcome::Declined {
                reason: DeclineReason::InsufficientFunds {
                    handle: None,
                    required: total_cost,
                    available: account.balance,
                },
                balance: account.balance,
            });
        }

        account.balance -= total_cost;
        account.updated_at = Utc::now();
        self.directory.save(&account).await?;

        let holding = match self.holdings.find(account_id, &symbol).await? {
            Some(mut existing) => {
                existing.avg_price = cost_basis::average_price(
                    existing.quantity,
                    existing.avg_price,
                    quantity,
                    quote.current_price,
                );
                existing.quantity += quantity;
                existing.updated_at = Utc::now();
                existing
            }
            None => Holding::new(account_id, symbol.clone(), quantity, quote.current_price),
        };
        self.holdings.save(&holding).await?;

        self.journal
            .append(TransactionRecord {
                id: Uuid::new_v4(),
                account_id,
                symbol: symbol.clone(),
                side: TradeSide::Buy,
                quantity,
                price: quote.current_price,
                total_amount: total_cost,
                counterparty: None,
                executed_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            account_id = %account_id,
            symbol = %symbol,
            quantity,
            price = %quote.current_price,
            total = %total_cost,
            "Buy executed."
        );

        Ok(TradeOutcome::Executed(TradeReceipt {
            symbol,
            quantity,
            price: quote.current_price,
            total_amount: total_cost,
            new_balance: account.balance,
            counterparty: None,
        }))
    }

    /// Sells `quantity` units of `symbol` peer-to-peer to the account named
    /// by `buyer_handle`, transferring the shares and the money atomically.
    pub async fn sell_to_peer(
        &self,
        seller_id: Uuid,
        symbol: &str,
        quantity: i64,
        buyer_handle: &str,
    ) -> Result<TradeOutcome, LedgerError> {
        if quantity < 1 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }
        let symbol = symbol.to_uppercase();

        // Guard order matters: the first failing guard determines the outcome.
        let seller = self
            .directory
            .find_by_id(seller_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(seller_id))?;

        let buyer = match self.directory.find_by_handle(buyer_handle).await? {
            Some(buyer) => buyer,
            None => {
                return Ok(TradeOutcome::Declined {
                    reason: DeclineReason::UnverifiedCounterparty {
                        handle: buyer_handle.to_string(),
                    },
                    balance: seller.balance,
                });
            }
        };

        if seller.id == buyer.id {
            return Ok(TradeOutcome::Declined {
                reason: DeclineReason::SelfTrade { handle: None },
                balance: seller.balance,
            });
        }

        // Redundant with the id check above, and kept deliberately: handles
        // are mutable independently of ids, so the two guards are not proven
        // equivalent.
        if seller.handle.eq_ignore_ascii_case(buyer_handle) {
            return Ok(TradeOutcome::Declined {
                reason: DeclineReason::SelfTrade {
                    handle: Some(buyer_handle.to_string()),
                },
                balance: seller.balance,
            });
        }

        // Both accounts stay locked, ascending-id order, for the rest of the
        // trade. State is re-read inside the critical section.
        let _guards = self.locks.acquire_pair(seller.id, buyer.id).await;

        let mut seller = self
            .directory
            .find_by_id(seller.id)
            .await?
            .ok_or(LedgerError::AccountNotFound(seller_id))?;
        let mut buyer = self
            .directory
            .find_by_id(buyer.id)
            .await?
            .ok_or(LedgerError::AccountNotFound(buyer.id))?;

        let mut seller_holding = match self.holdings.find(seller.id, &symbol).await? {
            Some(holding) => holding,
            None => {
                return Ok(TradeOutcome::Declined {
                    reason: DeclineReason::HoldingNotFound {
                        symbol: symbol.clone(),
                    },
                    balance: seller.balance,
                });
            }
        };

        if seller_holding.quantity < quantity {
            return Ok(TradeOutcome::Declined {
                reason: DeclineReason::InsufficientQuantity {
                    available: seller_holding.quantity,
                },
                balance: seller.balance,
            });
        }

        let quote = self.oracle.quote(&symbol).await?;
        let total_amount = quote.current_price * Decimal::from(quantity);

        if buyer.balance < total_amount {
            return Ok(TradeOutcome::Declined {
                reason: DeclineReason::InsufficientFunds {
                    handle: Some(buyer.handle.clone()),
                    required: total_amount,
                    available: buyer.balance,
                },
                balance: seller.balance,
            });
        }

        // Money transfer: the debit and credit are value-exact mirrors.
        let now = Utc::now();
        buyer.balance -= total_amount;
        buyer.updated_at = now;
        self.directory.save(&buyer).await?;

        seller.balance += total_amount;
        seller.updated_at = now;
        self.directory.save(&seller).await?;

        // Share transfer out of the seller's holding.
        seller_holding.quantity -= quantity;
        if seller_holding.quantity == 0 {
            self.holdings.delete(seller.id, &symbol).await?;
        } else {
            seller_holding.updated_at = now;
            self.holdings.save(&seller_holding).await?;
        }

        // Share transfer into the buyer's holding, recomputing its cost basis.
        let buyer_holding = match self.holdings.find(buyer.id, &symbol).await? {
            Some(mut existing) => {
                existing.avg_price = cost_basis::average_price(
                    existing.quantity,
                    existing.avg_price,
                    quantity,
                    quote.current_price,
                );
                existing.quantity += quantity;
                existing.updated_at = now;
                existing
            }
            None => Holding::new(buyer.id, symbol.clone(), quantity, quote.current_price),
        };
        self.holdings.save(&buyer_holding).await?;

        // One journal record per participant, identical price and total.
        self.journal
            .append(TransactionRecord {
                id: Uuid::new_v4(),
                account_id: seller.id,
                symbol: symbol.clone(),
                side: TradeSide::Sell,
                quantity,
                price: quote.current_price,
                total_amount,
                counterparty: Some(format!("{} (sold to)", buyer.handle)),
                executed_at: now,
            })
            .await?;
        self.journal
            .append(TransactionRecord {
                id: Uuid::new_v4(),
                account_id: buyer.id,
                symbol: symbol.clone(),
                side: TradeSide::Buy,
                quantity,
                price: quote.current_price,
                total_amount,
                counterparty: Some(format!("(bought from account {})", seller.id)),
                executed_at: now,
            })
            .await?;

        tracing::info!(
            seller_id = %seller.id,
            buyer_id = %buyer.id,
            symbol = %symbol,
            quantity,
            total = %total_amount,
            "Peer-to-peer sell executed."
        );

        Ok(TradeOutcome::Executed(TradeReceipt {
            symbol,
            quantity,
            price: quote.current_price,
            total_amount,
            new_balance: seller.balance,
            counterparty: Some(buyer.handle),
        }))
    }

    /// Values every holding of the account at the current market price.
    pub async fn portfolio(&self, account_id: Uuid) -> Result<Vec<PortfolioPosition>, LedgerError> {
        self.directory
            .find_by_id(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let holdings = self.holdings.for_account(account_id).await?;
        let mut positions = Vec::with_capacity(holdings.len());

        for holding in holdings {
            // If no quote can be produced, value the position at its own
            // average purchase price rather than failing the whole request.
            let current_price = match self.oracle.quote(&holding.symbol).await {
                Ok(quote) => quote.current_price,
                Err(e) => {
                    tracing::warn!(error = %e, symbol = %holding.symbol, "No quote for valuation, using cost basis.");
                    holding.avg_price
                }
            };
            positions.push(Self::value_position(&holding, current_price));
        }

        Ok(positions)
    }

    fn value_position(holding: &Holding, current_price: Decimal) -> PortfolioPosition {
        let quantity = Decimal::from(holding.quantity);
        let current_value = quantity * current_price;
        let invested_amount = quantity * holding.avg_price;
        let net_profit = current_value - invested_amount;
        let profit_percentage = if invested_amount > Decimal::ZERO {
            (net_profit / invested_amount)
                .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
                * Decimal::from(100)
        } else {
            Decimal::ZERO
        };

        PortfolioPosition {
            account_id: holding.account_id,
            symbol: holding.symbol.clone(),
            quantity: holding.quantity,
            avg_purchase_price: holding.avg_price,
            current_price,
            current_value,
            invested_amount,
            net_profit,
            profit_percentage,
        }
    }

    /// Returns the account's journal entries, newest first.
    pub async fn transactions(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        self.directory
            .find_by_id(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        Ok(self.journal.for_account(account_id).await?)
    }
}
