/// Formats an amount as Indian rupees with no decimals, e.g. `₹1,20,000`.
///
/// Absent, NaN and infinite values format the same as zero.
pub fn format_inr<V: Into<Option<f64>>>(value: V) -> String {
    let value = value.into().filter(|v| v.is_finite()).unwrap_or(0.0);
    let rounded = value.round();
    if rounded == 0.0 {
        return "₹0".to_string();
    }

    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_en_in(&digits))
}

// Last three digits, then pairs: 12345678 -> 1,23,45,678
fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_the_indian_way() {
        assert_eq!(format_inr(15000.0), "₹15,000");
        assert_eq!(format_inr(100000.0), "₹1,00,000");
        assert_eq!(format_inr(1234567.0), "₹12,34,567");
        assert_eq!(format_inr(100_000_000.0), "₹10,00,00,000");
        assert_eq!(format_inr(999.0), "₹999");
    }

    #[test]
    fn rounds_to_whole_rupees() {
        assert_eq!(format_inr(1000.49), "₹1,000");
        assert_eq!(format_inr(1000.5), "₹1,001");
        assert_eq!(format_inr(8791.59), "₹8,792");
    }

    #[test]
    fn missing_and_invalid_values_read_as_zero() {
        let zero = format_inr(0.0);
        assert_eq!(zero, "₹0");
        assert_eq!(format_inr(None::<f64>), zero);
        assert_eq!(format_inr(f64::NAN), zero);
        assert_eq!(format_inr(f64::INFINITY), zero);
        assert_eq!(format_inr(-0.2), zero);
    }

    #[test]
    fn negatives_keep_their_sign() {
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }

    #[test]
    fn never_prints_a_decimal_point() {
        for v in [0.0, 0.7, 12.345, 99999.99, 5_432_109.876] {
            let s = format_inr(v);
            assert!(s.starts_with('₹'), "{s}");
            assert!(!s.contains('.'), "{s}");
        }
    }
}
