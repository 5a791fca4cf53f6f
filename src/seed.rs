//! Demo data loaded at start-up when `SEED_DEMO_DATA` is enabled.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{CreateAppointmentRequest, GiftCard};
use crate::state::AppState;

/// Gift cards available in a fresh demo environment.
pub fn demo_gift_cards() -> Vec<GiftCard> {
    let card = |code: &str, dollars: i64, expiry: Option<NaiveDate>, active: bool| GiftCard {
        code: code.to_string(),
        is_active: active,
        expiry_date: expiry.unwrap_or(NaiveDate::MAX),
        remaining_amount: Decimal::new(dollars, 0),
        used_by: None,
    };

    vec![
        card("GIFT100", 100, NaiveDate::from_ymd_opt(2030, 12, 31), true),
        card("GIFT50", 50, NaiveDate::from_ymd_opt(2030, 6, 30), true),
        card("SPA25", 25, NaiveDate::from_ymd_opt(2030, 3, 31), true),
        card("HOLIDAY2023", 75, NaiveDate::from_ymd_opt(2023, 12, 31), true),
        card("USEDUP", 0, NaiveDate::from_ymd_opt(2030, 12, 31), true),
        card("VOID10", 10, None, false),
    ]
}

pub async fn seed_demo_data(state: &AppState) {
    let cards = demo_gift_cards();
    let card_count = cards.len();
    for card in cards {
        state.gift_cards.insert(card).await;
    }

    for (client_id, service, stylist) in [
        (1, "Haircut & Style", "Emma"),
        (2, "Color Treatment", "Sophia"),
    ] {
        state
            .appointments
            .create(CreateAppointmentRequest {
                client_id: Some(client_id),
                service: Some(service.to_string()),
                stylist: Some(stylist.to_string()),
                date: None,
            })
            .await;
    }

    info!("Seeded {} demo gift cards and 2 appointments", card_count);
}
