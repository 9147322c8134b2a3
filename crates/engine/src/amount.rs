use thiserror::Error;

/// Why a raw amount string failed to parse.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Parses a user-entered amount into a positive decimal value.
///
/// Accepts `.` or `,` as decimal separator (`,` is normalized before
/// parsing) and surrounding whitespace. Non-finite and non-positive values
/// are rejected.
///
/// # Examples
///
/// ```rust
/// use engine::parse_amount;
///
/// assert_eq!(parse_amount("30.5").unwrap(), 30.5);
/// assert_eq!(parse_amount("30,5").unwrap(), 30.5);
/// assert!(parse_amount("0").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| AmountError::Invalid)?;
    if !value.is_finite() {
        return Err(AmountError::Invalid);
    }
    if value <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!(parse_amount("10").unwrap(), 10.0);
        assert_eq!(parse_amount("10.5").unwrap(), 10.5);
        assert_eq!(parse_amount("10,50").unwrap(), 10.5);
        assert_eq!(parse_amount("  2.30 ").unwrap(), 2.3);
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_amount("   "), Err(AmountError::Empty));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_amount("abc"), Err(AmountError::Invalid));
        assert_eq!(parse_amount("10,5,0"), Err(AmountError::Invalid));
        assert_eq!(parse_amount("inf"), Err(AmountError::Invalid));
        assert_eq!(parse_amount("NaN"), Err(AmountError::Invalid));
    }

    #[test]
    fn parse_rejects_non_positive_values() {
        assert_eq!(parse_amount("0"), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("0,00"), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("-5"), Err(AmountError::NotPositive));
    }
}
