// Conversions between user-facing decimal strings and the integer units the
// engines compute in (cents, basis points).

use crate::{CalcError, BPS_PER_PERCENT, CENTS_PER_USD};

/// Parse a dollar amount such as `249.99`, `$1,250` or `0.5` into cents.
/// At most two fractional digits are accepted; negative amounts are rejected.
pub fn parse_usd(input: &str) -> Result<u64, CalcError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(CalcError::InvalidInput(format!(
            "amount must not be negative: {}",
            input
        )));
    }
    let cleaned: String = trimmed
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    parse_fixed_2(&cleaned, CENTS_PER_USD as u128)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| CalcError::InvalidInput(format!("not a dollar amount: {}", input)))
}

/// Parse a percentage such as `20`, `1.5` or `2.5%` into basis points.
pub fn parse_percent(input: &str) -> Result<u32, CalcError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(CalcError::InvalidInput(format!(
            "percentage must not be negative: {}",
            input
        )));
    }
    let cleaned = trimmed.trim_end_matches('%').trim_end();

    parse_fixed_2(cleaned, BPS_PER_PERCENT as u128)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| CalcError::InvalidInput(format!("not a percentage: {}", input)))
}

/// Parse `<digits>[.<0-2 digits>]` scaled by `unit` (100 for both cents and bps).
fn parse_fixed_2(s: &str, unit: u128) -> Option<u128> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 2 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole_val: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let frac_val: u128 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u128>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole_val.checked_mul(unit)?.checked_add(frac_val)
}

/// Format cents as `$1,234.56`.
pub fn format_usd(cents: u64) -> String {
    let dollars = cents / CENTS_PER_USD;
    let rem = cents % CENTS_PER_USD;
    format!("${}.{:02}", group_thousands(dollars), rem)
}

/// Format basis points as a percentage with trailing zeros removed: 150 -> `1.5%`.
pub fn format_bps(bps: u32) -> String {
    let whole = bps / BPS_PER_PERCENT;
    let frac = bps % BPS_PER_PERCENT;
    if frac == 0 {
        format!("{}%", whole)
    } else if frac % 10 == 0 {
        format!("{}.{}%", whole, frac / 10)
    } else {
        format!("{}.{:02}%", whole, frac)
    }
}

fn group_thousands(mut n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1_000 {
        groups.push(format!("{:03}", n % 1_000));
        n /= 1_000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usd() {
        assert_eq!(parse_usd("249.99").unwrap(), 24_999);
        assert_eq!(parse_usd("$1,250").unwrap(), 125_000);
        assert_eq!(parse_usd("0.5").unwrap(), 50);
        assert_eq!(parse_usd(".05").unwrap(), 5);
        assert_eq!(parse_usd("  100  ").unwrap(), 10_000);
    }

    #[test]
    fn test_parse_usd_rejects_garbage() {
        assert!(parse_usd("").is_err());
        assert!(parse_usd(".").is_err());
        assert!(parse_usd("-5").is_err());
        assert!(parse_usd("1.234").is_err());
        assert!(parse_usd("12a").is_err());
        assert!(parse_usd("1e3").is_err());
        assert!(parse_usd("99999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("20").unwrap(), 2_000);
        assert_eq!(parse_percent("1.5").unwrap(), 150);
        assert_eq!(parse_percent("2.5%").unwrap(), 250);
        assert_eq!(parse_percent("0.25").unwrap(), 25);
        assert!(parse_percent("-1").is_err());
        assert!(parse_percent("ten").is_err());
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0.00");
        assert_eq!(format_usd(17_999), "$179.99");
        assert_eq!(format_usd(12_548_000), "$125,480.00");
        assert_eq!(format_usd(100_000_000_05), "$100,000,000.05");
    }

    #[test]
    fn test_format_bps() {
        assert_eq!(format_bps(100), "1%");
        assert_eq!(format_bps(150), "1.5%");
        assert_eq!(format_bps(1_725), "17.25%");
        assert_eq!(format_bps(5), "0.05%");
    }
}
