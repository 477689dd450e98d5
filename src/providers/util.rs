use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

const USER_AGENT: &str = "octowage/0.1";

/// Builds an HTTP client whose requests give up after `timeout_secs`.
pub fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Parses a quote sent as a JSON string, e.g. `"5.7012"`.
pub fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).with_context(|| format!("Invalid decimal: '{value}'"))
}

/// Converts a quote sent as a JSON number without picking up binary float noise.
pub fn decimal_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        anyhow::bail!("Invalid decimal: {value}");
    }
    parse_decimal(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("5.7012").unwrap(), dec!(5.7012));
        assert_eq!(parse_decimal(" 6 ").unwrap(), dec!(6));
        assert!(parse_decimal("n/a").is_err());
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(5.1234).unwrap(), dec!(5.1234));
        assert!(decimal_from_f64(f64::NAN).is_err());
    }
}
