use biz_core::money::{format_bps, format_usd, parse_usd};
use colored::*;
use serde::Serialize;

/// Parse a USD argument, naming the flag in the error.
pub fn usd_arg(label: &str, raw: &str) -> Result<u64, Box<dyn std::error::Error>> {
    parse_usd(raw).map_err(|e| format!("Invalid {}: {}", label, e).into())
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_amount(label: &str, cents: u64) {
    println!("{} {}", format!("{}:", label).bold(), format_usd(cents).green());
}

pub fn print_rate(label: &str, bps: u32) {
    println!("{} {}", format!("{}:", label).bold(), format_bps(bps).cyan());
}

pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", format!("{}:", label).bold(), value);
}

/// Exactly three per-level referral counts.
pub fn referral_triple(counts: &[u32]) -> Result<[u32; 3], Box<dyn std::error::Error>> {
    <[u32; 3]>::try_from(counts).map_err(|_| {
        format!(
            "Expected 3 referral counts (level1,level2,level3), got {}",
            counts.len()
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_arg() {
        assert_eq!(usd_arg("price", "249.99").unwrap(), 24_999);
        let err = usd_arg("price", "abc").unwrap_err().to_string();
        assert!(err.starts_with("Invalid price"));
    }

    #[test]
    fn test_referral_triple() {
        assert_eq!(referral_triple(&[12, 8, 3]).unwrap(), [12, 8, 3]);
        assert!(referral_triple(&[1, 2]).is_err());
        assert!(referral_triple(&[1, 2, 3, 4]).is_err());
    }
}
