use std::sync::LazyLock;

use regex::Regex;

/// Smallest amount accepted as a product price, inclusive.
pub const MIN_PLAUSIBLE_PRICE: u64 = 100;
/// Largest amount accepted as a product price, inclusive.
pub const MAX_PLAUSIBLE_PRICE: u64 = 10_000_000;

struct PricePattern {
    name: &'static str,
    re: Regex,
}

// Either a plain digit run or thousands groups split by one space, tab, NBSP,
// thin space or narrow NBSP. Never a line break, and never two unrelated
// numbers such as a rating followed by the price.
const AMOUNT: &str = r"([0-9]{1,3}(?:[ \t\x{A0}\x{2009}\x{202F}][0-9]{3})+|[0-9]+)";
const SEP: &str = r"[ \t\x{A0}\x{2009}\x{202F}]*";
// The amount must not start in the middle of a longer digit run.
const START: &str = r"(?:^|[^0-9])";

/// Evaluated in order; the first pattern that yields a plausible amount wins.
/// Grouped thousands are part of `AMOUNT`, so the symbol and word patterns
/// cover grouped amounts followed by a currency marker.
static PRICE_PATTERNS: LazyLock<Vec<PricePattern>> = LazyLock::new(|| {
    [
        ("symbol", format!("{START}{AMOUNT}{SEP}₽")),
        ("word", format!("(?i){START}{AMOUNT}{SEP}(?:руб|р\\.)")),
        ("label", format!("(?i)цена{SEP}:{SEP}{AMOUNT}")),
    ]
    .into_iter()
    .map(|(name, pattern)| PricePattern {
        name,
        re: Regex::new(&pattern).expect("valid price regex"),
    })
    .collect()
});

/// Finds the product price in whole currency units.
///
/// Within a pattern, matches are tried in document order and the first one
/// inside `[MIN_PLAUSIBLE_PRICE, MAX_PLAUSIBLE_PRICE]` is taken. Returns
/// `None` when no pattern produces a plausible amount.
pub(super) fn extract_price(markdown: &str) -> Option<u64> {
    PRICE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .re
            .captures_iter(markdown)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| parse_amount(m.as_str()))
            .find(|&value| is_plausible(value))
            .inspect(|value| tracing::debug!(pattern = pattern.name, price = value, "price matched"))
    })
}

/// Drops group separators and parses the remaining digits. Amounts that do
/// not fit in `u64` are treated as unparseable.
fn parse_amount(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok()
}

fn is_plausible(value: u64) -> bool {
    (MIN_PLAUSIBLE_PRICE..=MAX_PLAUSIBLE_PRICE).contains(&value)
}
