//! Sales-by-state map (optional, `report.show_state_map`).
//!
//! Rendered as a shaded table keyed by two-letter USPS codes. The source data
//! carries full state names, so they are mapped to codes here; names without a
//! code are shown with `--`.

use contracts::GroupTotal;

use crate::format::{fit_label, format_currency};

const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

const STATE_CODES: [(&str, &str); 51] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// USPS code for a full state name or an existing code (case-insensitive)
pub fn state_code(state: &str) -> Option<&'static str> {
    let state = state.trim();
    STATE_CODES
        .iter()
        .find(|(name, code)| name.eq_ignore_ascii_case(state) || code.eq_ignore_ascii_case(state))
        .map(|(_, code)| *code)
}

/// Shade bucket (0..=3) of `value` relative to `max`
fn shade(value: i64, max: i64) -> char {
    if value <= 0 || max <= 0 {
        return SHADES[0];
    }
    let ratio = value as f64 / max as f64;
    let idx = ((ratio * SHADES.len() as f64).ceil() as usize).clamp(1, SHADES.len()) - 1;
    SHADES[idx]
}

/// One line per state, ordered as given (sales descending)
pub fn state_map(states: &[GroupTotal], label_width: usize) -> Vec<String> {
    if states.is_empty() {
        return vec![format!("  ({})", crate::chart::NO_DATA)];
    }

    let max = states.iter().map(|s| s.sales.raw()).max().unwrap_or(0);
    let mut lines: Vec<String> = states
        .iter()
        .map(|s| {
            let cell = shade(s.sales.raw(), max).to_string().repeat(4);
            format!(
                "  {} {} {} {}",
                state_code(&s.key).unwrap_or("--"),
                fit_label(&s.key, label_width),
                cell,
                format_currency(s.sales)
            )
        })
        .collect();
    lines.push(format!(
        "  legend: {} low  {} mid-low  {} mid-high  {} high",
        SHADES[0], SHADES[1], SHADES[2], SHADES[3]
    ));
    lines
}
