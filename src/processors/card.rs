//! Simulated card gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    simulate_latency, transaction_id, ApprovalPolicy, ChargeReceipt, ChargeRequest,
    PaymentProcessor,
};
use crate::error::{PaymentError, Result};
use crate::models::{MethodDetails, PaymentMethod, PaymentStatus};
use crate::validation::{card_last4, detect_card_brand, validate_card_data};

pub struct CardProcessor {
    latency: Duration,
    approval: Arc<dyn ApprovalPolicy>,
}

impl CardProcessor {
    pub fn new(latency: Duration, approval: Arc<dyn ApprovalPolicy>) -> Self {
        Self { latency, approval }
    }
}

#[async_trait]
impl PaymentProcessor for CardProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Card
    }

    async fn process(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        let card = request.card.as_ref().ok_or_else(|| {
            PaymentError::MissingField("Card data is required for card payments".to_string())
        })?;

        let errors = validate_card_data(card);
        if !errors.is_empty() {
            return Err(PaymentError::InvalidCard(errors));
        }

        debug!(amount = %request.amount, "Contacting card gateway");
        simulate_latency(self.latency).await;

        if !self.approval.approve() {
            warn!(amount = %request.amount, "Card charge declined");
            return Err(PaymentError::Declined);
        }

        let receipt = ChargeReceipt {
            transaction_id: transaction_id(PaymentMethod::Card),
            amount: request.amount,
            status: PaymentStatus::Completed,
            details: MethodDetails {
                card_last4: Some(card_last4(&card.number)),
                card_brand: Some(detect_card_brand(&card.number).to_string()),
                ..Default::default()
            },
        };

        info!(
            "Card charge approved: txn={}, amount=${:.2}",
            receipt.transaction_id, receipt.amount
        );
        Ok(receipt)
    }
}
