//! Field-level checks shared by the listing and message paths.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::ValidationError;

/// Returns the trimmed value, or `Required` when nothing is left.
pub fn require(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_string())
}

/// Checks the shape of an email address. Deliverability is not verified.
pub fn require_email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let email = require(field, value)?;
    if is_email_shaped(&email) {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(_) => !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Digits after the decimal point the `listings.price` column keeps.
pub const PRICE_SCALE: u32 = 2;

/// Largest price `NUMERIC(12, 2)` can hold.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Parses a user-entered price. Accepts plain decimals ("150", "19.99") and
/// scientific notation ("1.5e2"); rejects anything negative, unparseable,
/// finer than cents, or above `MAX_PRICE`.
pub fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Required { field: "price" });
    }
    let price = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ValidationError::InvalidPrice(text.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::InvalidPrice(text.to_string()));
    }
    let price = price.normalize();
    if price.scale() > PRICE_SCALE || price > MAX_PRICE {
        return Err(ValidationError::InvalidPrice(text.to_string()));
    }
    Ok(price)
}
