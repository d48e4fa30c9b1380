use std::sync::LazyLock;

use regex::Regex;

static INDEX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("static regex"));

const REWARD_UNITS: u128 = 1_000_000;

/// Every upstream or client sourced value goes through here before it lands in HTML or SVG.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}

/// Characters `[start, end)` of `input`; bounds past the end yield a shorter or empty slice.
pub fn char_slice(input: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }

    let mut offsets = input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()));

    let Some(from) = offsets.nth(start) else {
        return "";
    };
    let to = offsets.nth(end - start - 1).unwrap_or(input.len());

    &input[from..to]
}

/// Smallest-unit reward text to a two decimal amount, `"1500000"` becomes `"1.50"`.
pub fn format_reward(reward: &str) -> String {
    let reward = reward.trim();

    if let Ok(units) = reward.parse::<u128>() {
        let cents = units.saturating_add(REWARD_UNITS / 200) / (REWARD_UNITS / 100);
        return format!("{}.{:02}", cents / 100, cents % 100);
    }

    let value = reward.parse::<f64>().unwrap_or(f64::NAN);
    format!("{:.2}", value / REWARD_UNITS as f64)
}

/// Lenient integer prefix parse: `"3abc"` is 3, anything without leading digits is 0.
pub fn parse_index(raw: &str) -> i64 {
    let Some(digits) = INDEX_PREFIX.captures(raw).and_then(|c| c.get(1)) else {
        return 0;
    };
    let digits = digits.as_str();

    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Image selection: the requested index when in range, otherwise the first bounty.
pub fn select_index(requested: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match usize::try_from(requested) {
        Ok(index) if index < len => Some(index),
        _ => Some(0),
    }
}

/// Forward-only paging clamped to `[0, len - 1]`, `None` on an empty list.
pub fn next_index(prior: i64, len: usize) -> Option<usize> {
    let last = i64::try_from(len).ok()?.checked_sub(1).filter(|l| *l >= 0)?;
    let next = prior.saturating_add(1).clamp(0, last);

    usize::try_from(next).ok()
}
