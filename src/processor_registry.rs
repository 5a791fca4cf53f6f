//! Processor registry for the payment service.
//!
//! Maps each payment method tag to the processor that serves it. The
//! orchestrator resolves processors here, so swapping a simulated gateway for
//! a real one (or a test double) is a registration change only.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::models::PaymentMethod;
use crate::processors::{
    ApplePayProcessor, ApprovalPolicy, CardProcessor, GiftCardProcessor, PayPalProcessor,
    PaymentProcessor,
};
use crate::store::GiftCardStore;

#[derive(Default, Clone)]
pub struct ProcessorRegistry {
    processors: HashMap<PaymentMethod, Arc<dyn PaymentProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four simulated gateways.
    pub fn simulated(
        config: &PaymentConfig,
        approval: Arc<dyn ApprovalPolicy>,
        gift_cards: Arc<dyn GiftCardStore>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CardProcessor::new(config.card_latency, approval)));
        registry.register(Arc::new(PayPalProcessor::new(config.paypal_latency)));
        registry.register(Arc::new(ApplePayProcessor::new(config.apple_pay_latency)));
        registry.register(Arc::new(GiftCardProcessor::new(
            config.gift_card_latency,
            gift_cards,
        )));
        registry
    }

    /// Register a processor under its own method tag, replacing any previous
    /// one.
    pub fn register(&mut self, processor: Arc<dyn PaymentProcessor>) {
        self.processors.insert(processor.method(), processor);
    }

    pub fn get(&self, method: PaymentMethod) -> Option<Arc<dyn PaymentProcessor>> {
        self.processors.get(&method).cloned()
    }

    /// Number of registered processors (for logging at startup).
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }
}
