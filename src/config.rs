//! Configuration for the payment service.
//!
//! Settings come from the environment (a `.env` file is loaded first when
//! present). Every variable has a default, so an empty environment starts a
//! working demo server.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    /// Load demo gift cards and appointments at start-up.
    pub seed_demo_data: bool,
    pub payments: PaymentConfig,
}

/// Simulated gateway behaviour.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub card_latency: Duration,
    pub paypal_latency: Duration,
    pub apple_pay_latency: Duration,
    pub gift_card_latency: Duration,
    pub refund_latency: Duration,
    /// Probability that a valid card charge is approved.
    pub card_approval_rate: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            card_latency: Duration::from_millis(2000),
            paypal_latency: Duration::from_millis(1500),
            apple_pay_latency: Duration::from_millis(1000),
            gift_card_latency: Duration::from_millis(500),
            refund_latency: Duration::from_millis(1000),
            card_approval_rate: 0.95,
        }
    }
}

impl PaymentConfig {
    /// No latency and no random declines.
    pub fn instant() -> Self {
        Self {
            card_latency: Duration::ZERO,
            paypal_latency: Duration::ZERO,
            apple_pay_latency: Duration::ZERO,
            gift_card_latency: Duration::ZERO,
            refund_latency: Duration::ZERO,
            card_approval_rate: 1.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            seed_demo_data: true,
            payments: PaymentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let payment_defaults = defaults.payments;

        let card_approval_rate =
            parse_or(&lookup, "CARD_APPROVAL_RATE", payment_defaults.card_approval_rate)?;
        if !(0.0..=1.0).contains(&card_approval_rate) {
            bail!("CARD_APPROVAL_RATE must be between 0 and 1, got {card_approval_rate}");
        }

        let config = Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data)?,
            payments: PaymentConfig {
                card_latency: millis_or(&lookup, "CARD_LATENCY_MS", payment_defaults.card_latency)?,
                paypal_latency: millis_or(
                    &lookup,
                    "PAYPAL_LATENCY_MS",
                    payment_defaults.paypal_latency,
                )?,
                apple_pay_latency: millis_or(
                    &lookup,
                    "APPLE_PAY_LATENCY_MS",
                    payment_defaults.apple_pay_latency,
                )?,
                gift_card_latency: millis_or(
                    &lookup,
                    "GIFT_CARD_LATENCY_MS",
                    payment_defaults.gift_card_latency,
                )?,
                refund_latency: millis_or(
                    &lookup,
                    "REFUND_LATENCY_MS",
                    payment_defaults.refund_latency,
                )?,
                card_approval_rate,
            },
        };

        tracing::info!("Application configuration loaded");
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name} value: {raw:?}")),
        None => Ok(default),
    }
}

fn millis_or<F>(lookup: &F, name: &str, default: Duration) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let millis = parse_or(lookup, name, default.as_millis() as u64)?;
    Ok(Duration::from_millis(millis))
}
