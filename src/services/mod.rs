//! Business services.
//!
//! - `payment_service`: payment orchestration, refunds, history and analytics

pub mod payment_service;

pub use payment_service::PaymentService;
