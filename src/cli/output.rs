//! Simple line-based CLI output utilities.

use crate::models::{ContentItem, Plan};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print a section header.
///
/// ```text
/// LIBRARY
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a subsection title.
///
/// ```text
/// MAGAZINES (3)
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_section(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print an indented status line.
///
/// ```text
///   ✓ Signed in as ada@example.com
/// ```
pub fn print_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print an aligned `label: value` pair.
pub fn print_field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", label), value);
}

/// Print a failure line on stderr, with an optional hint below it.
pub fn print_failure(message: &str, hint: Option<&str>) {
    eprintln!("{} {}", icons::FAILURE, message);
    if let Some(hint) = hint {
        eprintln!("  {}", hint);
    }
}

/// One library row: tier marker, name, rating and id.
pub fn content_row(item: &ContentItem) -> String {
    let tier = if item.is_paid() { "$" } else { " " };
    format!(
        "{} {:<34} {:>3.1}★  {}",
        tier,
        truncate(&item.name, 34),
        item.rating,
        item.id
    )
}

pub fn print_content(item: &ContentItem) {
    println!("  {}", content_row(item));
}

pub fn print_plan(plan: &Plan) {
    print_section(&format!("{} ({})", plan.name.to_uppercase(), plan.price_label()));
    for feature in plan.feature_list() {
        let icon = if feature.available {
            icons::SUCCESS
        } else {
            icons::FAILURE
        };
        print_line(icon, &feature.label);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "•";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccessTier;

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_content_row_marks_paid_items() {
        let item = ContentItem {
            id: "m1".to_string(),
            name: "Tech Weekly".to_string(),
            rating: 4.5,
            tier: AccessTier::Paid,
            ..Default::default()
        };
        let row = content_row(&item);
        assert!(row.starts_with('$'));
        assert!(row.contains("Tech Weekly"));
        assert!(row.contains("4.5"));
        assert!(row.ends_with("m1"));
    }
}
