use once_cell::sync::Lazy;
use regex::Regex;

// Leading integer the way a browser's parseInt reads it: "  -12abc" -> -12.
// ASCII digits only; `\d` would also match other scripts' digits.
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)([0-9]+)").unwrap());

/// es-ES only groups thousands once the integer part reaches five digits.
const MIN_GROUPING_DIGITS: usize = 5;
const GROUP_SEPARATOR: char = '.';

/// Read the integer at the start of `input`, ignoring anything after it.
///
/// Returns `None` when no ASCII digits lead the string. Values too large
/// for an `i64` saturate instead of failing.
///
/// # Examples
/// ```
/// use promo_tickets::utils::parse_leading_int;
/// assert_eq!(parse_leading_int(" 12abc"), Some(12));
/// assert_eq!(parse_leading_int("-3"), Some(-3));
/// assert_eq!(parse_leading_int("abc"), None);
/// ```
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let captures = LEADING_INT_REGEX.captures(input)?;
    let negative = &captures[1] == "-";
    // The capture is ASCII digits, so overflow is the only way parsing fails.
    let magnitude = captures[2].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Insert es-ES thousands separators into a run of ASCII digits.
pub fn group_digits(digits: &str) -> String {
    if digits.len() < MIN_GROUPING_DIGITS {
        return digits.to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Extract the element id a same-page link points at.
///
/// `"#tickets"` yields `Some("tickets")`; a bare `"#"` or an external link
/// yields `None`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_follows_browser_parsing() {
        assert_eq!(parse_leading_int("7"), Some(7));
        assert_eq!(parse_leading_int("  +4 tickets"), Some(4));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("-0"), Some(0));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("e5"), None);
        assert_eq!(parse_leading_int("- 5"), None);
    }

    #[test]
    fn leading_int_saturates_on_overflow() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(-i64::MAX));
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        assert_eq!(parse_leading_int("\u{663}"), None);
        assert_eq!(parse_leading_int("\u{661}\u{662}"), None);
        assert_eq!(parse_leading_int("\u{ff13}"), None);
        assert_eq!(parse_leading_int("4\u{663}"), Some(4));
    }

    #[test]
    fn grouping_starts_at_five_digits() {
        assert_eq!(group_digits("7"), "7");
        assert_eq!(group_digits("1234"), "1234");
        assert_eq!(group_digits("12345"), "12.345");
        assert_eq!(group_digits("123456"), "123.456");
        assert_eq!(group_digits("1234567"), "1.234.567");
    }

    #[test]
    fn anchor_ids() {
        assert_eq!(anchor_target_id("#boletos"), Some("boletos"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("https://example.com/#x"), None);
    }
}
