//! Text charts.
//!
//! Charts return their lines instead of writing, so every sink can embed them.

use contracts::{Amount, DatePoint, GroupTotal};

use crate::format::{fit_label, format_currency, format_currency_cents};

const BAR: char = '█';
const POINT: char = '•';

/// Message shown in place of a chart with no data
pub const NO_DATA: &str = "No data for the current selection";

/// Horizontal bar chart, one row per group, in the given order
pub fn bar_chart(groups: &[GroupTotal], label_width: usize, bar_width: usize) -> Vec<String> {
    if groups.is_empty() {
        return vec![format!("  ({NO_DATA})")];
    }

    let max = groups.iter().map(|g| g.sales.raw()).max().unwrap_or(0);
    groups
        .iter()
        .map(|g| {
            let len = scaled(g.sales.raw(), max, bar_width);
            format!(
                "  {} │{:<bar_width$} {}",
                fit_label(&g.key, label_width),
                BAR.to_string().repeat(len),
                format_currency_cents(g.sales),
            )
        })
        .collect()
}

/// Ranked bar chart with position numbers
pub fn ranked_bar_chart(
    groups: &[GroupTotal],
    label_width: usize,
    bar_width: usize,
) -> Vec<String> {
    if groups.is_empty() {
        return vec![format!("  ({NO_DATA})")];
    }

    bar_chart(groups, label_width, bar_width)
        .into_iter()
        .enumerate()
        .map(|(i, line)| format!("{:>3}.{}", i + 1, line))
        .collect()
}

/// Line chart of sales over time
///
/// Dates are already ascending. When there are more dates than columns the
/// series is split into equal consecutive buckets and each column shows the
/// bucket's summed sales.
pub fn line_chart(points: &[DatePoint], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() {
        return vec![format!("  ({NO_DATA})")];
    }

    let width = width.max(1);
    let height = height.max(2);
    let columns = bucket(points, width);
    let max = columns.iter().map(|a| a.raw()).max().unwrap_or(0).max(0);

    let levels: Vec<usize> = columns
        .iter()
        .map(|a| scaled(a.raw(), max, height - 1))
        .collect();

    let axis_width = format_currency(Amount::from_raw(max)).len().max(2);
    let mut lines = Vec::with_capacity(height + 2);

    for row in (0..height).rev() {
        let label = if row == height - 1 {
            format_currency(Amount::from_raw(max))
        } else if row == 0 {
            "$0".to_string()
        } else {
            String::new()
        };
        let body: String = levels
            .iter()
            .map(|&level| if level == row { POINT } else { ' ' })
            .collect();
        lines.push(format!("  {label:>axis_width$} ┤{body}"));
    }

    lines.push(format!(
        "  {:>axis_width$} └{}",
        "",
        "─".repeat(columns.len())
    ));

    let (first, last) = (points[0].date, points[points.len() - 1].date);
    lines.push(format!(
        "  {:>axis_width$}  {} → {} ({} dates)",
        "",
        first,
        last,
        points.len()
    ));
    lines
}

/// Sum consecutive points into at most `width` buckets
fn bucket(points: &[DatePoint], width: usize) -> Vec<Amount> {
    if points.len() <= width {
        return points.iter().map(|p| p.sales).collect();
    }
    let per_bucket = points.len().div_ceil(width);
    points
        .chunks(per_bucket)
        .map(|chunk| chunk.iter().map(|p| p.sales).sum())
        .collect()
}

/// Map `value` in `[0, max]` to `[0, cells]`
fn scaled(value: i64, max: i64, cells: usize) -> usize {
    if value <= 0 || max <= 0 {
        return 0;
    }
    ((value as f64 / max as f64) * cells as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, units: i64) -> DatePoint {
        DatePoint {
            date: NaiveDate::from_ymd_opt(2017, 1, day).unwrap(),
            sales: Amount::from_units(units),
        }
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let groups = vec![
            GroupTotal::new("Furniture", Amount::from_units(30)),
            GroupTotal::new("Tech", Amount::from_units(100)),
        ];
        let lines = bar_chart(&groups, 10, 10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&"█".repeat(3)));
        assert!(!lines[0].contains(&"█".repeat(4)));
        assert!(lines[1].contains(&"█".repeat(10)));
        assert!(lines[1].ends_with("$100.00"));
    }

    #[test]
    fn test_empty_charts_show_no_data() {
        assert!(bar_chart(&[], 10, 10)[0].contains(NO_DATA));
        assert!(ranked_bar_chart(&[], 10, 10)[0].contains(NO_DATA));
        assert!(line_chart(&[], 10, 4)[0].contains(NO_DATA));
    }

    #[test]
    fn test_ranked_chart_numbers_rows() {
        let groups = vec![
            GroupTotal::new("Lamp", Amount::from_units(130)),
            GroupTotal::new("Pen", Amount::from_units(50)),
        ];
        let lines = ranked_bar_chart(&groups, 8, 5);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[1].starts_with("  2."));
    }

    #[test]
    fn test_line_chart_shape() {
        let points = vec![point(1, 10), point(2, 40), point(3, 20)];
        let lines = line_chart(&points, 20, 5);
        // 5 plot rows + axis + date range
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("$40"));
        assert!(lines[0].contains('•'));
        assert!(lines[6].contains("2017-01-01 → 2017-01-03"));
    }

    #[test]
    fn test_bucket_keeps_total() {
        let points: Vec<DatePoint> = (1..=31).map(|d| point(d, d as i64)).collect();
        let buckets = bucket(&points, 8);
        assert!(buckets.len() <= 8);
        let total: Amount = buckets.iter().sum();
        assert_eq!(total, Amount::from_units((1..=31).sum()));
    }
}
