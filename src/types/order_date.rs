use chrono::NaiveDate;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const PARTNER_DATE_FORMAT: &str = "%m/%d/%Y";

/// Reformats an ISO-8601 calendar date into the partner's `MM/DD/YYYY` form.
///
/// Only the ISO side is coerced. A value that is not exactly `YYYY-MM-DD` is assumed to already be
/// in partner form and is passed through untouched, whatever it contains.
pub fn normalize_order_date(value: &str) -> String {
    if !is_iso_shaped(value) {
        return value.to_string()
    }

    match NaiveDate::parse_from_str(value, ISO_DATE_FORMAT) {
        Ok(date) => date.format(PARTNER_DATE_FORMAT).to_string(),
        Err(_) => value.to_string()
    }
}

//NOTE: chrono accepts unpadded fields and signed years for `%Y-%m-%d`, ISO-8601 does not
fn is_iso_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == 10 && bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit()
    })
}
