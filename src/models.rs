//! Domain models for the payment service.
//!
//! Records held by the stores (payments, gift cards, appointments) plus the
//! request and response bodies of the HTTP surface. All wire formats use
//! camelCase field names; money is a fixed-point `Decimal`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every amount the service handles is in US dollars.
pub const CURRENCY: &str = "USD";

// ============================================================================
// Enumerations
// ============================================================================

/// Payment method tag as sent by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    ApplePay,
    GiftCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::ApplePay => "apple-pay",
            PaymentMethod::GiftCard => "gift-card",
        }
    }

    /// Prefix of transaction ids issued by this method's gateway.
    pub fn transaction_prefix(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "TXN",
            PaymentMethod::Paypal => "PP",
            PaymentMethod::ApplePay => "AP",
            PaymentMethod::GiftCard => "GC",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            "apple-pay" => Ok(PaymentMethod::ApplePay),
            "gift-card" => Ok(PaymentMethod::GiftCard),
            other => Err(other.to_string()),
        }
    }
}

/// Lifecycle of a payment: `pending -> completed -> refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

// ============================================================================
// Stored Records
// ============================================================================

/// A committed payment. Only the refund path mutates it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u64,
    pub transaction_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
    pub client_id: Option<u64>,
    pub appointment_id: Option<u64>,
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_card_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_date: Option<DateTime<Utc>>,
}

/// Refund metadata attached to a payment when it moves to `refunded`.
#[derive(Debug, Clone)]
pub struct RefundRecord {
    pub refund_id: String,
    pub amount: Decimal,
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
}

/// A stored-value code redeemable up to its remaining balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    pub code: String,
    pub is_active: bool,
    pub expiry_date: NaiveDate,
    pub remaining_amount: Decimal,
    pub used_by: Option<u64>,
}

/// A salon appointment, as far as the payment flow needs to see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    pub client_id: Option<u64>,
    pub service: Option<String>,
    pub stylist: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: AppointmentStatus,
    pub payment_id: Option<u64>,
}

// ============================================================================
// Request Models (Deserialize from JSON input)
// ============================================================================

/// Card details submitted with a card payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
    pub name: String,
    pub zip_code: String,
}

/// Booking context a payment belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub appointment_id: Option<u64>,
    pub client_id: Option<u64>,
    pub service: Option<String>,
}

/// Body of `POST /api/payments/process`.
///
/// Every field is optional at the wire level so that missing fields produce
/// the service's own validation message instead of a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub booking_data: Option<BookingData>,
    pub card_data: Option<CardData>,
    pub gift_card_code: Option<String>,
}

/// Body of `POST /api/payments/refund`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub payment_id: u64,
    pub reason: Option<String>,
    pub amount: Option<Decimal>,
}

/// Body of `POST /api/payments/validate-gift-card`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateGiftCardRequest {
    pub code: String,
}

/// Query of `GET /api/payments/history`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub client_id: Option<u64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Query of `GET /api/payments/analytics`. Both bounds are inclusive days.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Body of `POST /api/appointments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub client_id: Option<u64>,
    pub service: Option<String>,
    pub stylist: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

// ============================================================================
// Response Models
// ============================================================================

/// Method-specific fields reported by a processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_card_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<Decimal>,
}

/// Response of a successful `POST /api/payments/process`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub success: bool,
    pub payment_id: u64,
    pub transaction_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(flatten)]
    pub details: MethodDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundReceipt {
    pub success: bool,
    pub refund_id: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistory {
    pub payments: Vec<Payment>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Public view of a gift card returned by the validation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardSummary {
    pub code: String,
    pub remaining_amount: Decimal,
    pub expiry_date: NaiveDate,
}

impl From<&GiftCard> for GiftCardSummary {
    fn from(card: &GiftCard) -> Self {
        Self {
            code: card.code.clone(),
            remaining_amount: card.remaining_amount,
            expiry_date: card.expiry_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardValidation {
    pub success: bool,
    pub gift_card: GiftCardSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodTotals {
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAnalytics {
    pub total_revenue: Decimal,
    pub total_transactions: usize,
    pub average_transaction: Decimal,
    pub method_breakdown: BTreeMap<String, MethodTotals>,
    pub status_breakdown: BTreeMap<String, usize>,
    pub payments: Vec<Payment>,
}
