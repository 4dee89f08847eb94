use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SYMBOL: char = '£';

/// Rounds half away from zero and pins the scale so the value always renders
/// with exactly `places` fractional digits and a `.` separator.
pub(crate) fn fixed_places(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

/// Formats an amount as pounds sterling, e.g. `£1,500,000.00`. The format is
/// fixed and does not follow the host locale.
pub fn format_currency(amount: Decimal) -> String {
    let rendered = fixed_places(amount.abs(), 2);
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}")
}
