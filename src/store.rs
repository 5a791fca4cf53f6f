//! Storage for payments, gift cards and appointments.
//!
//! The service layer only sees the async store traits, so a database-backed
//! implementation can replace the in-memory ones without touching business
//! logic. The in-memory stores keep every read-modify-write inside a single
//! write guard.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{PaymentError, Result};
use crate::models::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, GiftCard, Payment, PaymentStatus,
    RefundRecord,
};

// ============================================================================
// Store Traits
// ============================================================================

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Store a new payment. The store assigns the id; any id on the input is
    /// overwritten.
    async fn insert(&self, payment: Payment) -> Payment;

    async fn get(&self, id: u64) -> Option<Payment>;

    async fn list(&self) -> Vec<Payment>;

    /// Move a `completed` payment to `refunded` and attach the refund.
    async fn mark_refunded(&self, id: u64, refund: RefundRecord) -> Result<Payment>;
}

#[async_trait]
pub trait GiftCardStore: Send + Sync {
    async fn insert(&self, card: GiftCard);

    /// Active card with exactly this code.
    async fn find_active(&self, code: &str) -> Option<GiftCard>;

    /// Debit `amount` from the card, failing without change if the balance
    /// no longer covers it.
    async fn debit(&self, code: &str, amount: Decimal, client_id: Option<u64>) -> Result<GiftCard>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, request: CreateAppointmentRequest) -> Appointment;

    async fn get(&self, id: u64) -> Option<Appointment>;

    async fn list(&self) -> Vec<Appointment>;

    /// Mark the appointment confirmed and link it to `payment_id`.
    async fn confirm(&self, id: u64, payment_id: u64) -> Option<Appointment>;
}

// ============================================================================
// In-memory Implementations
// ============================================================================

/// Payments kept in insertion order; ids come from a monotonic counter.
#[derive(Debug)]
pub struct InMemoryPaymentStore {
    payments: RwLock<Vec<Payment>>,
    next_id: AtomicU64,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self {
            payments: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, mut payment: Payment) -> Payment {
        let mut payments = self.payments.write().await;
        payment.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        payments.push(payment.clone());
        debug!(payment_id = payment.id, "Payment stored");
        payment
    }

    async fn get(&self, id: u64) -> Option<Payment> {
        self.payments
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn list(&self) -> Vec<Payment> {
        self.payments.read().await.clone()
    }

    async fn mark_refunded(&self, id: u64, refund: RefundRecord) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PaymentError::PaymentNotFound)?;

        if payment.status != PaymentStatus::Completed {
            return Err(PaymentError::NotRefundable);
        }

        payment.status = PaymentStatus::Refunded;
        payment.refund_id = Some(refund.refund_id);
        payment.refund_amount = Some(refund.amount);
        payment.refund_reason = refund.reason;
        payment.refund_date = Some(refund.date);
        Ok(payment.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryGiftCardStore {
    cards: RwLock<Vec<GiftCard>>,
}

impl InMemoryGiftCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `cards`.
    pub fn with_cards(cards: Vec<GiftCard>) -> Self {
        Self {
            cards: RwLock::new(cards),
        }
    }
}

#[async_trait]
impl GiftCardStore for InMemoryGiftCardStore {
    async fn insert(&self, card: GiftCard) {
        let mut cards = self.cards.write().await;
        cards.retain(|c| c.code != card.code);
        cards.push(card);
    }

    async fn find_active(&self, code: &str) -> Option<GiftCard> {
        self.cards
            .read()
            .await
            .iter()
            .find(|c| c.code == code && c.is_active)
            .cloned()
    }

    async fn debit(&self, code: &str, amount: Decimal, client_id: Option<u64>) -> Result<GiftCard> {
        let mut cards = self.cards.write().await;
        let card = cards
            .iter_mut()
            .find(|c| c.code == code && c.is_active)
            .ok_or_else(|| PaymentError::GiftCard("Invalid or expired gift card code".to_string()))?;

        if card.remaining_amount < amount {
            return Err(PaymentError::InsufficientBalance {
                available: card.remaining_amount,
            });
        }

        card.remaining_amount -= amount;
        if client_id.is_some() {
            card.used_by = client_id;
        }
        Ok(card.clone())
    }
}

#[derive(Debug)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
    next_id: AtomicU64,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self {
            appointments: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(&self, request: CreateAppointmentRequest) -> Appointment {
        let mut appointments = self.appointments.write().await;
        let appointment = Appointment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: request.client_id,
            service: request.service,
            stylist: request.stylist,
            date: request.date,
            status: AppointmentStatus::Pending,
            payment_id: None,
        };
        appointments.push(appointment.clone());
        appointment
    }

    async fn get(&self, id: u64) -> Option<Appointment> {
        self.appointments
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    async fn list(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }

    async fn confirm(&self, id: u64, payment_id: u64) -> Option<Appointment> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments.iter_mut().find(|a| a.id == id)?;
        appointment.status = AppointmentStatus::Confirmed;
        appointment.payment_id = Some(payment_id);
        Some(appointment.clone())
    }
}

/// Today's date in UTC, used for gift card expiry checks.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
