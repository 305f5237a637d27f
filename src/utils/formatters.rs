// Formatting utilities

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// "¥25,000"
pub fn format_yen(amount: u64) -> String {
    format!("¥{}", format_number(amount))
}

/// Yen per point, one decimal: "¥11.5"
pub fn format_unit_price(price: f64) -> String {
    format!("¥{:.1}", price)
}

/// Text progress bar, e.g. `▰▰▰▱▱▱▱▱▱▱ 30.0%`
pub fn progress_bar(percent: f64) -> String {
    const WIDTH: usize = 10;
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * WIDTH as f64).round() as usize;

    format!(
        "{}{} {:.1}%",
        "▰".repeat(filled),
        "▱".repeat(WIDTH - filled),
        percent
    )
}

/// Truncate string to max chars with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(25001), "¥25,001");
        assert_eq!(format_unit_price(11.549), "¥11.5");
        assert_eq!(format_unit_price(0.0), "¥0.0");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "▱▱▱▱▱▱▱▱▱▱ 0.0%");
        assert_eq!(progress_bar(30.0), "▰▰▰▱▱▱▱▱▱▱ 30.0%");
        assert_eq!(progress_bar(100.0), "▰▰▰▰▰▰▰▰▰▰ 100.0%");
        assert_eq!(progress_bar(250.0), "▰▰▰▰▰▰▰▰▰▰ 100.0%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("石垣空港ターミナル", 5), "石垣...");
    }
}
