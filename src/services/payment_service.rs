//! # Payment Orchestration
//!
//! `PaymentService` owns the payment flow end to end:
//!
//! 1. **process_payment**: validate the request, dispatch to the method's
//!    processor, commit the payment, confirm the referenced appointment
//! 2. **refund_payment**: refund a completed payment
//! 3. **payment_history** / **get_payment**: read access
//! 4. **analytics**: revenue and breakdowns over a date range
//! 5. **check_gift_card**: card-level gift card validation
//!
//! Stores and processors are injected, so tests run the real flow against
//! in-memory stores with deterministic processors.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::error::{PaymentError, Result};
use crate::models::{
    AnalyticsQuery, GiftCardSummary, GiftCardValidation, HistoryQuery, MethodTotals, Payment,
    PaymentAnalytics, PaymentHistory, PaymentMethod, PaymentReceipt, PaymentStatus,
    ProcessPaymentRequest, RefundReceipt, RefundRecord, RefundRequest, CURRENCY,
};
use crate::processor_registry::ProcessorRegistry;
use crate::processors::{simulate_latency, validate_gift_card, ChargeRequest};
use crate::store::{today, AppointmentStore, GiftCardStore, PaymentStore};

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Largest single charge accepted. Keeps every running total well inside
/// `Decimal`'s range no matter how many payments accumulate.
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
    gift_cards: Arc<dyn GiftCardStore>,
    appointments: Arc<dyn AppointmentStore>,
    processors: ProcessorRegistry,
    refund_latency: Duration,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentStore>,
        gift_cards: Arc<dyn GiftCardStore>,
        appointments: Arc<dyn AppointmentStore>,
        processors: ProcessorRegistry,
        refund_latency: Duration,
    ) -> Self {
        Self {
            payments,
            gift_cards,
            appointments,
            processors,
            refund_latency,
        }
    }

    // ========================================================================
    // Payment Processing
    // ========================================================================

    /// Charge a payment through the processor for its method and commit it.
    ///
    /// Nothing is stored unless the processor succeeds. When the booking
    /// references an appointment, that appointment is confirmed and linked to
    /// the new payment.
    #[instrument(skip(self, request), fields(method = ?request.method, amount = ?request.amount))]
    pub async fn process_payment(&self, request: ProcessPaymentRequest) -> Result<PaymentReceipt> {
        let method = request.method.as_deref().filter(|m| !m.trim().is_empty());
        let (Some(amount), Some(method), Some(booking)) =
            (request.amount, method, request.booking_data)
        else {
            return Err(PaymentError::MissingField(
                "Missing required payment information".to_string(),
            ));
        };

        if amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount);
        }
        if amount > MAX_PAYMENT_AMOUNT {
            return Err(PaymentError::AmountOutOfRange(format!(
                "Amount cannot exceed ${:.2}",
                MAX_PAYMENT_AMOUNT
            )));
        }
        if amount.normalize().scale() > 2 {
            return Err(PaymentError::AmountOutOfRange(
                "Amount cannot have more than 2 decimal places".to_string(),
            ));
        }

        let gift_card_code = request
            .gift_card_code
            .filter(|code| !code.trim().is_empty());

        let method: PaymentMethod = method.parse().map_err(PaymentError::UnsupportedMethod)?;
        match method {
            PaymentMethod::Card if request.card_data.is_none() => {
                return Err(PaymentError::MissingField(
                    "Card data is required for card payments".to_string(),
                ));
            }
            PaymentMethod::GiftCard if gift_card_code.is_none() => {
                return Err(PaymentError::MissingField(
                    "Gift card code is required".to_string(),
                ));
            }
            _ => {}
        }

        let processor = self
            .processors
            .get(method)
            .ok_or_else(|| PaymentError::UnsupportedMethod(method.to_string()))?;

        let charge = ChargeRequest {
            amount,
            client_id: booking.client_id,
            card: request.card_data,
            gift_card_code,
        };
        let receipt = processor.process(&charge).await?;

        let payment = self
            .payments
            .insert(Payment {
                id: 0,
                transaction_id: receipt.transaction_id.clone(),
                amount: receipt.amount,
                currency: CURRENCY.to_string(),
                method,
                status: receipt.status,
                date: Utc::now(),
                client_id: booking.client_id,
                appointment_id: booking.appointment_id,
                service: booking.service,
                card_last4: receipt.details.card_last4.clone(),
                card_brand: receipt.details.card_brand.clone(),
                gift_card_code: receipt.details.gift_card_code.clone(),
                refund_id: None,
                refund_amount: None,
                refund_reason: None,
                refund_date: None,
            })
            .await;

        info!(
            "Payment {} committed: txn={}, method={}, amount=${:.2}",
            payment.id, payment.transaction_id, method, payment.amount
        );

        if let Some(appointment_id) = booking.appointment_id {
            match self.appointments.confirm(appointment_id, payment.id).await {
                Some(_) => info!(
                    "Appointment {} confirmed by payment {}",
                    appointment_id, payment.id
                ),
                None => warn!(
                    "Payment {} references unknown appointment {}",
                    payment.id, appointment_id
                ),
            }
        }

        Ok(PaymentReceipt {
            success: true,
            payment_id: payment.id,
            transaction_id: payment.transaction_id,
            amount: payment.amount,
            currency: payment.currency,
            method,
            status: payment.status,
            details: receipt.details,
        })
    }

    // ========================================================================
    // Refunds
    // ========================================================================

    /// Refund a completed payment, by default in full.
    #[instrument(skip(self, request), fields(payment_id = request.payment_id))]
    pub async fn refund_payment(&self, request: RefundRequest) -> Result<RefundReceipt> {
        let payment = self
            .payments
            .get(request.payment_id)
            .await
            .ok_or(PaymentError::PaymentNotFound)?;

        if payment.status != PaymentStatus::Completed {
            return Err(PaymentError::NotRefundable);
        }

        let amount = request.amount.unwrap_or(payment.amount);
        if amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidRefund(
                "Refund amount must be greater than zero".to_string(),
            ));
        }
        if amount > payment.amount {
            return Err(PaymentError::InvalidRefund(format!(
                "Refund amount cannot exceed original payment amount of ${:.2}",
                payment.amount
            )));
        }

        simulate_latency(self.refund_latency).await;

        let refund_id = format!("REF_{}", Utc::now().timestamp_millis());
        let refunded = self
            .payments
            .mark_refunded(
                payment.id,
                RefundRecord {
                    refund_id: refund_id.clone(),
                    amount,
                    reason: request.reason,
                    date: Utc::now(),
                },
            )
            .await?;

        info!(
            "Payment {} refunded: refund={}, amount=${:.2}",
            refunded.id, refund_id, amount
        );

        Ok(RefundReceipt {
            success: true,
            refund_id,
            amount,
            status: refunded.status,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get_payment(&self, id: u64) -> Result<Payment> {
        self.payments
            .get(id)
            .await
            .ok_or(PaymentError::PaymentNotFound)
    }

    /// Newest first, optionally for one client, paginated.
    pub async fn payment_history(&self, query: HistoryQuery) -> PaymentHistory {
        let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let mut payments: Vec<Payment> = self
            .payments
            .list()
            .await
            .into_iter()
            .filter(|p| query.client_id.map_or(true, |id| p.client_id == Some(id)))
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        let total = payments.len();
        let payments = payments.into_iter().skip(offset).take(limit).collect();

        PaymentHistory {
            payments,
            total,
            limit,
            offset,
        }
    }

    /// Revenue counts completed payments only; the transaction count and the
    /// breakdowns cover every payment in range.
    pub async fn analytics(&self, query: AnalyticsQuery) -> PaymentAnalytics {
        let payments: Vec<Payment> = self
            .payments
            .list()
            .await
            .into_iter()
            .filter(|p| {
                let day = p.date.date_naive();
                query.start_date.map_or(true, |start| day >= start)
                    && query.end_date.map_or(true, |end| day <= end)
            })
            .collect();

        let mut total_revenue = Decimal::ZERO;
        let mut completed = 0usize;
        let mut method_breakdown: BTreeMap<String, MethodTotals> = BTreeMap::new();
        let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();

        for payment in &payments {
            if payment.status == PaymentStatus::Completed {
                total_revenue += payment.amount;
                completed += 1;
            }

            let totals = method_breakdown
                .entry(payment.method.as_str().to_string())
                .or_default();
            totals.count += 1;
            totals.amount += payment.amount;

            *status_breakdown
                .entry(payment.status.as_str().to_string())
                .or_default() += 1;
        }

        let average_transaction = if completed > 0 {
            (total_revenue / Decimal::from(completed)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        PaymentAnalytics {
            total_revenue,
            total_transactions: payments.len(),
            average_transaction,
            method_breakdown,
            status_breakdown,
            payments,
        }
    }

    // ========================================================================
    // Gift Cards
    // ========================================================================

    pub async fn check_gift_card(&self, code: &str) -> Result<GiftCardValidation> {
        let card = validate_gift_card(self.gift_cards.as_ref(), code, today()).await?;
        Ok(GiftCardValidation {
            success: true,
            gift_card: GiftCardSummary::from(&card),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentConfig;
    use crate::models::{
        AppointmentStatus, BookingData, CardData, CreateAppointmentRequest, GiftCard,
    };
    use crate::processors::FixedApproval;
    use crate::store::{InMemoryAppointmentStore, InMemoryGiftCardStore, InMemoryPaymentStore};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct Fixture {
        service: Arc<PaymentService>,
        gift_cards: Arc<InMemoryGiftCardStore>,
        appointments: Arc<InMemoryAppointmentStore>,
    }

    fn fixture(approve: bool) -> Fixture {
        fixture_with_refund_latency(approve, Duration::ZERO)
    }

    fn fixture_with_refund_latency(approve: bool, refund_latency: Duration) -> Fixture {
        let payments = Arc::new(InMemoryPaymentStore::new());
        let gift_cards = Arc::new(InMemoryGiftCardStore::with_cards(vec![GiftCard {
            code: "GIFT100".to_string(),
            is_active: true,
            expiry_date: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
            remaining_amount: dec!(100),
            used_by: None,
        }]));
        let appointments = Arc::new(InMemoryAppointmentStore::new());
        let config = PaymentConfig::instant();
        let registry = ProcessorRegistry::simulated(
            &config,
            Arc::new(FixedApproval(approve)),
            gift_cards.clone(),
        );

        Fixture {
            service: Arc::new(PaymentService::new(
                payments,
                gift_cards.clone(),
                appointments.clone(),
                registry,
                refund_latency,
            )),
            gift_cards,
            appointments,
        }
    }

    fn booking(client_id: u64) -> BookingData {
        BookingData {
            appointment_id: None,
            client_id: Some(client_id),
            service: Some("Haircut".to_string()),
        }
    }

    fn card_request(amount: Decimal) -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            amount: Some(amount),
            method: Some("card".to_string()),
            booking_data: Some(booking(1)),
            card_data: Some(CardData {
                number: "4111111111111111".to_string(),
                expiry: "12/99".to_string(),
                cvv: "123".to_string(),
                name: "Jane Doe".to_string(),
                zip_code: "10001".to_string(),
            }),
            gift_card_code: None,
        }
    }

    fn simple_request(method: &str, amount: Decimal, client_id: u64) -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            amount: Some(amount),
            method: Some(method.to_string()),
            booking_data: Some(booking(client_id)),
            ..Default::default()
        }
    }

    fn gift_request(amount: Decimal) -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            gift_card_code: Some("GIFT100".to_string()),
            ..simple_request("gift-card", amount, 5)
        }
    }

    #[tokio::test]
    async fn test_card_payment_is_committed() {
        let f = fixture(true);
        let receipt = f.service.process_payment(card_request(dec!(100))).await.unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.payment_id, 1);
        assert_eq!(receipt.status, PaymentStatus::Completed);
        assert_eq!(receipt.details.card_brand.as_deref(), Some("Visa"));
        assert_eq!(receipt.details.card_last4.as_deref(), Some("1111"));

        let stored = f.service.get_payment(1).await.unwrap();
        assert_eq!(stored.transaction_id, receipt.transaction_id);
        assert_eq!(stored.currency, "USD");
        assert_eq!(stored.service.as_deref(), Some("Haircut"));
    }

    #[tokio::test]
    async fn test_declined_card_stores_nothing() {
        let f = fixture(false);
        let err = f
            .service
            .process_payment(card_request(dec!(100)))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Declined));
        assert_eq!(f.service.payment_history(HistoryQuery::default()).await.total, 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let f = fixture(true);

        let mut req = card_request(dec!(10));
        req.booking_data = None;
        let err = f.service.process_payment(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required payment information");

        let mut req = card_request(dec!(10));
        req.card_data = None;
        let err = f.service.process_payment(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Card data is required for card payments");

        let err = f
            .service
            .process_payment(simple_request("gift-card", dec!(10), 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Gift card code is required");
    }

    #[tokio::test]
    async fn test_unsupported_method_and_bad_amount() {
        let f = fixture(true);

        let err = f
            .service
            .process_payment(simple_request("bitcoin", dec!(10), 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported payment method: bitcoin");

        let err = f
            .service
            .process_payment(simple_request("paypal", dec!(0), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount));
    }

    #[tokio::test]
    async fn test_blank_method_and_gift_code_count_as_missing() {
        let f = fixture(true);

        let err = f
            .service
            .process_payment(simple_request("", dec!(10), 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required payment information");

        let req = ProcessPaymentRequest {
            gift_card_code: Some("  ".to_string()),
            ..simple_request("gift-card", dec!(10), 1)
        };
        let err = f.service.process_payment(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Gift card code is required");
        assert_eq!(
            f.gift_cards.find_active("GIFT100").await.unwrap().remaining_amount,
            dec!(100)
        );
    }

    #[tokio::test]
    async fn test_amount_ceiling_and_precision() {
        let f = fixture(true);

        let err = f
            .service
            .process_payment(simple_request("paypal", dec!(10000000000000000000000000000), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::AmountOutOfRange(_)));
        assert_eq!(err.to_string(), "Amount cannot exceed $1000000.00");

        let err = f
            .service
            .process_payment(simple_request("paypal", dec!(10.001), 1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Amount cannot have more than 2 decimal places");

        // Trailing zeros past the cents are not extra precision.
        f.service
            .process_payment(simple_request("paypal", dec!(10.500), 1))
            .await
            .unwrap();
        for _ in 0..8 {
            f.service
                .process_payment(simple_request("paypal", MAX_PAYMENT_AMOUNT, 1))
                .await
                .unwrap();
        }

        let report = f.service.analytics(AnalyticsQuery::default()).await;
        assert_eq!(report.total_transactions, 9);
        assert_eq!(report.total_revenue, dec!(8000010.50));
    }

    #[tokio::test]
    async fn test_payment_confirms_appointment() {
        let f = fixture(true);
        let appointment = f
            .appointments
            .create(CreateAppointmentRequest {
                client_id: Some(1),
                service: Some("Haircut".to_string()),
                ..Default::default()
            })
            .await;

        let mut req = simple_request("apple-pay", dec!(45), 1);
        req.booking_data = Some(BookingData {
            appointment_id: Some(appointment.id),
            ..booking(1)
        });
        let receipt = f.service.process_payment(req).await.unwrap();

        let updated = f.appointments.get(appointment.id).await.unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(updated.payment_id, Some(receipt.payment_id));
    }

    #[tokio::test]
    async fn test_unknown_appointment_does_not_fail_payment() {
        let f = fixture(true);
        let mut req = simple_request("paypal", dec!(20), 1);
        req.booking_data = Some(BookingData {
            appointment_id: Some(404),
            ..booking(1)
        });

        let receipt = f.service.process_payment(req).await.unwrap();
        assert_eq!(receipt.payment_id, 1);
    }

    #[tokio::test]
    async fn test_gift_card_payment_debits_balance() {
        let f = fixture(true);
        let receipt = f.service.process_payment(gift_request(dec!(40))).await.unwrap();
        assert_eq!(receipt.details.remaining_balance, Some(dec!(60)));

        let card = f.gift_cards.find_active("GIFT100").await.unwrap();
        assert_eq!(card.remaining_amount, dec!(60));
        assert_eq!(card.used_by, Some(5));

        let stored = f.service.get_payment(receipt.payment_id).await.unwrap();
        assert_eq!(stored.gift_card_code.as_deref(), Some("GIFT100"));
    }

    #[tokio::test]
    async fn test_gift_card_overdraw_is_rejected() {
        let f = fixture(true);
        let err = f
            .service
            .process_payment(gift_request(dec!(150)))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Insufficient gift card balance. Available: $100.00"
        );
        assert_eq!(
            f.gift_cards.find_active("GIFT100").await.unwrap().remaining_amount,
            dec!(100)
        );
    }

    #[tokio::test]
    async fn test_refund_once() {
        let f = fixture(true);
        let receipt = f
            .service
            .process_payment(simple_request("paypal", dec!(80), 2))
            .await
            .unwrap();

        let refund = f
            .service
            .refund_payment(RefundRequest {
                payment_id: receipt.payment_id,
                reason: Some("Cancelled".to_string()),
                amount: None,
            })
            .await
            .unwrap();
        assert!(refund.refund_id.starts_with("REF_"));
        assert_eq!(refund.amount, dec!(80));
        assert_eq!(refund.status, PaymentStatus::Refunded);

        let stored = f.service.get_payment(receipt.payment_id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Refunded);
        assert_eq!(stored.refund_reason.as_deref(), Some("Cancelled"));
        assert_eq!(stored.refund_amount, Some(dec!(80)));
        assert!(stored.refund_date.is_some());

        let err = f
            .service
            .refund_payment(RefundRequest {
                payment_id: receipt.payment_id,
                reason: None,
                amount: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment cannot be refunded");
    }

    #[tokio::test]
    async fn test_concurrent_refunds_only_one_succeeds() {
        let f = fixture_with_refund_latency(true, Duration::from_millis(50));
        let receipt = f
            .service
            .process_payment(simple_request("apple-pay", dec!(35), 3))
            .await
            .unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = f.service.clone();
                let payment_id = receipt.payment_id;
                tokio::spawn(async move {
                    service
                        .refund_payment(RefundRequest {
                            payment_id,
                            reason: None,
                            amount: None,
                        })
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(PaymentError::NotRefundable) => rejected += 1,
                Err(other) => panic!("unexpected refund error: {other}"),
            }
        }
        assert_eq!((succeeded, rejected), (1, 1));

        let stored = f.service.get_payment(receipt.payment_id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Refunded);
        assert_eq!(stored.refund_amount, Some(dec!(35)));
    }

    #[tokio::test]
    async fn test_refund_amount_bounds() {
        let f = fixture(true);
        let receipt = f
            .service
            .process_payment(simple_request("paypal", dec!(50), 2))
            .await
            .unwrap();

        let too_much = f
            .service
            .refund_payment(RefundRequest {
                payment_id: receipt.payment_id,
                reason: None,
                amount: Some(dec!(50.01)),
            })
            .await;
        assert!(matches!(too_much, Err(PaymentError::InvalidRefund(_))));

        let partial = f
            .service
            .refund_payment(RefundRequest {
                payment_id: receipt.payment_id,
                reason: None,
                amount: Some(dec!(20)),
            })
            .await
            .unwrap();
        assert_eq!(partial.amount, dec!(20));

        let missing = f
            .service
            .refund_payment(RefundRequest {
                payment_id: 999,
                reason: None,
                amount: None,
            })
            .await;
        assert!(matches!(missing, Err(PaymentError::PaymentNotFound)));
    }

    #[tokio::test]
    async fn test_history_filters_sorts_and_paginates() {
        let f = fixture(true);
        for (amount, client) in [(dec!(10), 1), (dec!(20), 2), (dec!(30), 1), (dec!(40), 1)] {
            f.service
                .process_payment(simple_request("paypal", amount, client))
                .await
                .unwrap();
        }

        let history = f
            .service
            .payment_history(HistoryQuery {
                client_id: Some(1),
                limit: Some(2),
                offset: Some(0),
            })
            .await;
        assert_eq!(history.total, 3);
        assert_eq!(history.limit, 2);
        let amounts: Vec<Decimal> = history.payments.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![dec!(40), dec!(30)]);

        let next_page = f
            .service
            .payment_history(HistoryQuery {
                client_id: Some(1),
                limit: Some(2),
                offset: Some(2),
            })
            .await;
        assert_eq!(next_page.payments.len(), 1);
        assert_eq!(next_page.payments[0].amount, dec!(10));
    }

    #[tokio::test]
    async fn test_analytics_breakdowns() {
        let f = fixture(true);
        let first = f
            .service
            .process_payment(simple_request("paypal", dec!(30), 1))
            .await
            .unwrap();
        f.service
            .process_payment(simple_request("paypal", dec!(20), 1))
            .await
            .unwrap();
        f.service.process_payment(card_request(dec!(50))).await.unwrap();
        f.service
            .refund_payment(RefundRequest {
                payment_id: first.payment_id,
                reason: None,
                amount: None,
            })
            .await
            .unwrap();

        let report = f.service.analytics(AnalyticsQuery::default()).await;
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.total_revenue, dec!(70));
        assert_eq!(report.average_transaction, dec!(35));
        assert_eq!(
            report.method_breakdown["paypal"],
            MethodTotals {
                count: 2,
                amount: dec!(50)
            }
        );
        assert_eq!(report.method_breakdown["card"].count, 1);
        assert_eq!(report.status_breakdown["completed"], 2);
        assert_eq!(report.status_breakdown["refunded"], 1);

        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        let empty = f
            .service
            .analytics(AnalyticsQuery {
                start_date: None,
                end_date: Some(yesterday),
            })
            .await;
        assert_eq!(empty.total_transactions, 0);
        assert_eq!(empty.average_transaction, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_check_gift_card() {
        let f = fixture(true);
        let ok = f.service.check_gift_card("GIFT100").await.unwrap();
        assert_eq!(ok.gift_card.remaining_amount, dec!(100));

        let err = f.service.check_gift_card("MISSING").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid or expired gift card code");
    }
}
