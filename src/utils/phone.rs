use std::sync::LazyLock;

use regex::Regex;

/// Country calling code for Morocco, without the leading `+`.
pub const COUNTRY_CODE: &str = "212";

static CANONICAL_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+212[0-9]{9}$").expect("static phone regex"));

/// Normalizes common Moroccan phone spellings to `+212XXXXXXXXX`.
///
/// Inputs that fit none of the known shapes are returned unchanged so that
/// `validate` can reject them.
pub fn format(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if digits.starts_with(COUNTRY_CODE) {
        return format!("+{}", digits);
    }

    if digits.len() == 9 {
        return format!("+{}{}", COUNTRY_CODE, digits);
    }

    if digits.len() == 10 && digits.starts_with('0') {
        return format!("+{}{}", COUNTRY_CODE, &digits[1..]);
    }

    phone.to_string()
}

/// True iff `phone` is exactly `+212` followed by nine ASCII digits.
pub fn validate(phone: &str) -> bool {
    CANONICAL_PHONE.is_match(phone)
}
