//! Shared application state.
//!
//! Cloned into every request through an axum `Extension`. All members are
//! behind `Arc`, so a clone is cheap.

use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::processor_registry::ProcessorRegistry;
use crate::processors::{ApprovalPolicy, RandomApproval};
use crate::services::PaymentService;
use crate::store::{
    AppointmentStore, GiftCardStore, InMemoryAppointmentStore, InMemoryGiftCardStore,
    InMemoryPaymentStore,
};

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
    pub gift_cards: Arc<dyn GiftCardStore>,
    pub appointments: Arc<dyn AppointmentStore>,
}

impl AppState {
    /// In-memory state whose card approvals follow the configured rate.
    pub fn in_memory(config: &PaymentConfig) -> Self {
        Self::with_approval(
            config,
            Arc::new(RandomApproval::new(config.card_approval_rate)),
        )
    }

    /// In-memory state with an explicit card approval policy.
    pub fn with_approval(config: &PaymentConfig, approval: Arc<dyn ApprovalPolicy>) -> Self {
        let gift_cards: Arc<dyn GiftCardStore> = Arc::new(InMemoryGiftCardStore::new());
        let appointments: Arc<dyn AppointmentStore> = Arc::new(InMemoryAppointmentStore::new());
        let processors = ProcessorRegistry::simulated(config, approval, gift_cards.clone());

        tracing::info!(
            "Processor registry initialized with {} processors",
            processors.processor_count()
        );

        let payments = Arc::new(PaymentService::new(
            Arc::new(InMemoryPaymentStore::new()),
            gift_cards.clone(),
            appointments.clone(),
            processors,
            config.refund_latency,
        ));

        Self {
            payments,
            gift_cards,
            appointments,
        }
    }
}
