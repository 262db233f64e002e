//! Number formatting for metric cards and chart labels.

use contracts::Amount;

/// Insert `,` every three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-unit currency, truncated toward zero: `$2,297,200`, `-$1,234`
pub fn format_currency(amount: Amount) -> String {
    let units = amount.whole_units();
    let sign = if units < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(units.unsigned_abs()))
}

/// Currency with cents for chart labels: `$1,234.57`
pub fn format_currency_cents(amount: Amount) -> String {
    // raw is ten-thousandths; round half away from zero to cents
    let raw = amount.raw();
    let cents = (raw.unsigned_abs() + 50) / 100;
    let sign = if raw < 0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Plain integer count
pub fn format_count(count: usize) -> String {
    count.to_string()
}

/// Truncate to `width` characters, marking the cut with `…`
pub fn fit_label(label: &str, width: usize) -> String {
    let count = label.chars().count();
    if count <= width {
        return format!("{label:<width$}");
    }
    let mut out: String = label.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
