//! Display formatting for amounts and durations
//!
//! Money is shown with two decimals and comma thousands separators,
//! month counts with no decimals, years with one.

use crate::terms::PERIODS_PER_YEAR;

/// `10258.3806` -> `10,258.38`
pub fn money(value: f64) -> String {
    group_thousands(&format!("{:.2}", value))
}

/// `115502.8` -> `115,503`
pub fn whole(value: f64) -> String {
    group_thousands(&format!("{:.0}", value))
}

/// Months to years with one decimal: `60.0` -> `5.0`
pub fn years(months: f64) -> String {
    format!("{:.1}", months / PERIODS_PER_YEAR as f64)
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    // Non-finite values (inf, NaN) pass through untouched
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return formatted.to_string();
    }

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}
