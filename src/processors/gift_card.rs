//! Gift card validation and redemption.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{simulate_latency, transaction_id, ChargeReceipt, ChargeRequest, PaymentProcessor};
use crate::error::{PaymentError, Result};
use crate::models::{GiftCard, MethodDetails, PaymentMethod, PaymentStatus};
use crate::store::{today, GiftCardStore};

/// Card-level validity: the code exists and is active, has not expired as of
/// `today`, and still has a balance. Whether the balance covers a particular
/// amount is checked by the processor.
pub async fn validate_gift_card(
    store: &dyn GiftCardStore,
    code: &str,
    today: NaiveDate,
) -> Result<GiftCard> {
    let card = store
        .find_active(code)
        .await
        .ok_or_else(|| PaymentError::GiftCard("Invalid or expired gift card code".to_string()))?;

    if today > card.expiry_date {
        return Err(PaymentError::GiftCard("Gift card has expired".to_string()));
    }

    if card.remaining_amount <= Decimal::ZERO {
        return Err(PaymentError::GiftCard(
            "Gift card has no remaining balance".to_string(),
        ));
    }

    Ok(card)
}

pub struct GiftCardProcessor {
    latency: Duration,
    cards: Arc<dyn GiftCardStore>,
}

impl GiftCardProcessor {
    pub fn new(latency: Duration, cards: Arc<dyn GiftCardStore>) -> Self {
        Self { latency, cards }
    }
}

#[async_trait]
impl PaymentProcessor for GiftCardProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::GiftCard
    }

    async fn process(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        let code = request
            .gift_card_code
            .as_deref()
            .ok_or_else(|| PaymentError::MissingField("Gift card code is required".to_string()))?;

        let card = validate_gift_card(self.cards.as_ref(), code, today()).await?;
        if card.remaining_amount < request.amount {
            return Err(PaymentError::InsufficientBalance {
                available: card.remaining_amount,
            });
        }

        debug!(code, amount = %request.amount, "Redeeming gift card");
        simulate_latency(self.latency).await;

        // The store re-checks the balance under its lock, so a concurrent
        // redemption that landed during the delay cannot overdraw the card.
        let card = self
            .cards
            .debit(code, request.amount, request.client_id)
            .await?;

        let transaction_id = transaction_id(PaymentMethod::GiftCard);
        info!(
            "Gift card redeemed: txn={}, code={}, amount=${:.2}, remaining=${:.2}",
            transaction_id, card.code, request.amount, card.remaining_amount
        );

        Ok(ChargeReceipt {
            transaction_id,
            amount: request.amount,
            status: PaymentStatus::Completed,
            details: MethodDetails {
                gift_card_code: Some(card.code),
                remaining_balance: Some(card.remaining_amount),
                ..Default::default()
            },
        })
    }
}
