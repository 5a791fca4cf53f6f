//! Simulated Apple Pay authorization. Always approves.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::{simulate_latency, transaction_id, ChargeReceipt, ChargeRequest, PaymentProcessor};
use crate::error::Result;
use crate::models::{MethodDetails, PaymentMethod, PaymentStatus};

pub struct ApplePayProcessor {
    latency: Duration,
}

impl ApplePayProcessor {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PaymentProcessor for ApplePayProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::ApplePay
    }

    async fn process(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        simulate_latency(self.latency).await;

        let transaction_id = transaction_id(PaymentMethod::ApplePay);
        info!("Apple Pay charge approved: txn={}", transaction_id);

        Ok(ChargeReceipt {
            transaction_id,
            amount: request.amount,
            status: PaymentStatus::Completed,
            details: MethodDetails::default(),
        })
    }
}
