//! Card data validation.
//!
//! Pure checks run before a card charge is attempted. Every failing field
//! contributes one human-readable message; an empty list means the card is
//! acceptable.

use chrono::{Datelike, NaiveDate, Utc};

use crate::models::CardData;

/// Validate card data against today's date.
pub fn validate_card_data(card: &CardData) -> Vec<String> {
    validate_card_data_at(card, Utc::now().date_naive())
}

/// Validate card data, judging expiry relative to `today`.
pub fn validate_card_data_at(card: &CardData, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    let number = normalize_card_number(&card.number);
    if !is_digits(&number, 13, 19) {
        errors.push("Invalid card number format".to_string());
    } else if !luhn_check(&number) {
        errors.push("Invalid card number".to_string());
    }

    if let Some(err) = check_expiry(&card.expiry, today) {
        errors.push(err.to_string());
    }

    if !is_digits(&card.cvv, 3, 4) {
        errors.push("Invalid CVV".to_string());
    }

    if card.name.trim().chars().count() < 2 {
        errors.push("Cardholder name is required".to_string());
    }

    if !is_digits(&card.zip_code, 5, 5) {
        errors.push("Invalid ZIP code".to_string());
    }

    errors
}

/// Card number with all whitespace removed.
pub fn normalize_card_number(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Luhn checksum over a string of ASCII digits.
pub fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Best-effort brand guess from the leading digits.
pub fn detect_card_brand(number: &str) -> &'static str {
    let number = normalize_card_number(number);
    let two: u32 = number.get(..2).and_then(|p| p.parse().ok()).unwrap_or(0);

    if number.starts_with('4') {
        "Visa"
    } else if (51..=55).contains(&two) {
        "Mastercard"
    } else if two == 34 || two == 37 {
        "American Express"
    } else if number.starts_with('6') {
        "Discover"
    } else {
        "Unknown"
    }
}

/// Last four digits of the card number.
pub fn card_last4(number: &str) -> String {
    let digits: Vec<char> = normalize_card_number(number).chars().collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

fn check_expiry(expiry: &str, today: NaiveDate) -> Option<&'static str> {
    let Some((month, year)) = expiry.trim().split_once('/') else {
        return Some("Invalid expiry date format");
    };
    let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<u32>()) else {
        return Some("Invalid expiry date format");
    };

    if !(1..=12).contains(&month) {
        return Some("Invalid expiry month");
    }

    let current_year = today.year().rem_euclid(100) as u32;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Some("Card has expired");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn card(number: &str, expiry: &str) -> CardData {
        CardData {
            number: number.to_string(),
            expiry: expiry.to_string(),
            cvv: "123".to_string(),
            name: "Jane Doe".to_string(),
            zip_code: "10001".to_string(),
        }
    }

    #[test]
    fn test_valid_card_has_no_errors() {
        let errors = validate_card_data_at(&card("4111 1111 1111 1111", "12/30"), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_luhn_valid_numbers_pass() {
        for number in [
            "4111111111111111",
            "5555555555554444",
            "378282246310005",
            "6011111111111117",
            "4012888888881881",
        ] {
            assert!(luhn_check(number), "{number} should pass Luhn");
            let errors = validate_card_data_at(&card(number, "12/30"), today());
            assert!(!errors.contains(&"Invalid card number".to_string()));
        }
    }

    #[test]
    fn test_single_digit_change_fails_luhn() {
        let errors = validate_card_data_at(&card("4111111111111112", "12/30"), today());
        assert_eq!(errors, vec!["Invalid card number".to_string()]);

        let errors = validate_card_data_at(&card("4111111111111121", "12/30"), today());
        assert_eq!(errors, vec!["Invalid card number".to_string()]);
    }

    #[test]
    fn test_number_format() {
        let errors = validate_card_data_at(&card("4111-1111-1111-1111", "12/30"), today());
        assert_eq!(errors, vec!["Invalid card number format".to_string()]);

        let errors = validate_card_data_at(&card("411111111111", "12/30"), today());
        assert_eq!(errors, vec!["Invalid card number format".to_string()]);
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        let errors = validate_card_data_at(&card("4111111111111111", "10/26"), today());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_expiry_last_month_is_expired() {
        let errors = validate_card_data_at(&card("4111111111111111", "09/26"), today());
        assert_eq!(errors, vec!["Card has expired".to_string()]);

        let errors = validate_card_data_at(&card("4111111111111111", "12/25"), today());
        assert_eq!(errors, vec!["Card has expired".to_string()]);
    }

    #[test]
    fn test_expiry_month_and_format() {
        let errors = validate_card_data_at(&card("4111111111111111", "13/30"), today());
        assert_eq!(errors, vec!["Invalid expiry month".to_string()]);

        let errors = validate_card_data_at(&card("4111111111111111", "1230"), today());
        assert_eq!(errors, vec!["Invalid expiry date format".to_string()]);
    }

    #[test]
    fn test_remaining_fields_are_all_reported() {
        let data = CardData {
            number: "4111111111111111".to_string(),
            expiry: "12/30".to_string(),
            cvv: "12".to_string(),
            name: " J ".to_string(),
            zip_code: "1000A".to_string(),
        };
        let errors = validate_card_data_at(&data, today());
        assert_eq!(
            errors,
            vec![
                "Invalid CVV".to_string(),
                "Cardholder name is required".to_string(),
                "Invalid ZIP code".to_string(),
            ]
        );
    }

    #[test]
    fn test_four_digit_cvv_accepted() {
        let mut data = card("378282246310005", "12/30");
        data.cvv = "1234".to_string();
        assert!(validate_card_data_at(&data, today()).is_empty());
    }

    #[test]
    fn test_brand_detection() {
        assert_eq!(detect_card_brand("4111111111111111"), "Visa");
        assert_eq!(detect_card_brand("5105105105105100"), "Mastercard");
        assert_eq!(detect_card_brand("5555555555554444"), "Mastercard");
        assert_eq!(detect_card_brand("378282246310005"), "American Express");
        assert_eq!(detect_card_brand("341111111111111"), "American Express");
        assert_eq!(detect_card_brand("6011111111111117"), "Discover");
        assert_eq!(detect_card_brand("3530111333300000"), "Unknown");
    }

    #[test]
    fn test_last4_ignores_spaces() {
        assert_eq!(card_last4("4111 1111 1111 1234"), "1234");
    }
}
