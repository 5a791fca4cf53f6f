//! # Payment Method Processors
//!
//! One processor per payment method. Each implements [`PaymentProcessor`]
//! and stands in for an external gateway: it validates what it needs, waits
//! a configured latency, and returns a [`ChargeReceipt`].
//!
//! - `card`: card validation, approval decided by an [`ApprovalPolicy`]
//! - `paypal`: always approved
//! - `apple_pay`: always approved
//! - `gift_card`: validates and debits a stored gift card

pub mod apple_pay;
pub mod card;
pub mod gift_card;
pub mod paypal;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{CardData, MethodDetails, PaymentMethod, PaymentStatus};

pub use apple_pay::ApplePayProcessor;
pub use card::CardProcessor;
pub use gift_card::{validate_gift_card, GiftCardProcessor};
pub use paypal::PayPalProcessor;

// ============================================================================
// Processor Contract
// ============================================================================

/// What a processor needs to know to attempt a charge.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub client_id: Option<u64>,
    pub card: Option<CardData>,
    pub gift_card_code: Option<String>,
}

/// Gateway answer for a successful charge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeReceipt {
    pub transaction_id: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub details: MethodDetails,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// The method tag this processor serves.
    fn method(&self) -> PaymentMethod;

    /// Attempt the charge. Validation failures and declines are errors.
    async fn process(&self, request: &ChargeRequest) -> Result<ChargeReceipt>;
}

// ============================================================================
// Card Approval
// ============================================================================

/// Decides whether the simulated bank approves a card charge.
pub trait ApprovalPolicy: Send + Sync {
    fn approve(&self) -> bool;
}

/// Approves with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomApproval {
    rate: f64,
}

impl RandomApproval {
    /// `rate` is clamped to `0.0..=1.0`.
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }
}

impl ApprovalPolicy for RandomApproval {
    fn approve(&self) -> bool {
        rand::random::<f64>() < self.rate
    }
}

/// Always gives the same answer. Used to make tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedApproval(pub bool);

impl ApprovalPolicy for FixedApproval {
    fn approve(&self) -> bool {
        self.0
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `<PREFIX>_<epoch-ms>`
pub fn transaction_id(method: PaymentMethod) -> String {
    format!(
        "{}_{}",
        method.transaction_prefix(),
        Utc::now().timestamp_millis()
    )
}

/// Non-blocking stand-in for gateway round-trip time.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
