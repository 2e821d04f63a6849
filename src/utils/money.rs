//! Conversion of decimal currency amounts to integer minor units.
//!
//! Amounts arrive from clients as JSON numbers in major units (`12.50`) and are
//! stored and sent to the payment provider as minor units (`1250`).

/// Largest accepted amount in major units.
pub const MAX_MAJOR_AMOUNT: f64 = 1_000_000_000.0;

/// Errors that can occur while converting an amount.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MoneyError {
    #[error("Amount must be a finite number")]
    NotFinite,

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount must not exceed {MAX_MAJOR_AMOUNT}")]
    TooLarge,

    #[error("Amount must have at most two decimal places")]
    TooPrecise,
}

/// Converts a major-unit amount to minor units (hundredths).
///
/// # Errors
///
/// Rejects non-finite, non-positive and oversized amounts, and amounts with more
/// than two decimal places.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(to_minor_units(12.5).unwrap(), 1250);
/// assert!(to_minor_units(1.005).is_err());
/// ```
pub fn to_minor_units(amount: f64) -> Result<i64, MoneyError> {
    if !amount.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(MoneyError::NotPositive);
    }
    if amount > MAX_MAJOR_AMOUNT {
        return Err(MoneyError::TooLarge);
    }

    let scaled = amount * 100.0;
    let rounded = scaled.round();
    // Binary floats cannot hold most decimal fractions exactly.
    if (scaled - rounded).abs() > 1e-6 {
        return Err(MoneyError::TooPrecise);
    }

    Ok(rounded as i64)
}
