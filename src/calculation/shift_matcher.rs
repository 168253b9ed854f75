//! Shift-label normalization and rule-group resolution.
//!
//! Raw shift labels arrive as free text ("8/18", "08:00-18:00",
//! "8-18 (kapı)"). Normalization reduces every spelling of the same shift
//! to one canonical key so pattern lists stay short; resolution walks the
//! company's rule groups in order with a wildcard fallback.

use crate::config::{CompanyConfig, ShiftRuleGroup, WILDCARD_PATTERN};

/// Normalizes a free-text shift label into its canonical key.
///
/// Steps, in order: trim, strip a trailing parenthetical note, unify dash
/// variants (`/`, en/em dash, minus) to `-`, strip all whitespace. If the
/// remaining string splits into exactly two dash-separated time-of-day
/// segments it is re-encoded as `HHmm-HHmm`; otherwise the cleaned string is
/// lowercased as-is.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::normalize_shift_label;
///
/// assert_eq!(normalize_shift_label("8/18"), "0800-1800");
/// assert_eq!(normalize_shift_label(" 08:00 - 18:00 (gate B)"), "0800-1800");
/// assert_eq!(normalize_shift_label("20:00–06:00"), "2000-0600");
/// assert_eq!(normalize_shift_label("Gece"), "gece");
/// ```
pub fn normalize_shift_label(label: &str) -> String {
    let mut cleaned = label.trim().to_string();

    // Trailing parenthetical notes carry no shift information.
    if let Some(open) = cleaned.find('(') {
        cleaned.truncate(open);
    }

    let cleaned: String = cleaned
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '/' | '–' | '—' | '−' => '-',
            c => c,
        })
        .collect();

    let segments: Vec<&str> = cleaned.split('-').collect();
    if segments.len() == 2
        && let (Some((h1, m1)), Some((h2, m2))) =
            (parse_time_token(segments[0]), parse_time_token(segments[1]))
    {
        return format!("{:02}{:02}-{:02}{:02}", h1, m1, h2, m2);
    }

    cleaned.to_lowercase()
}

/// Parses a single time-of-day token: `8`, `08`, `8:30`, `0830`, `830`.
fn parse_time_token(token: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = match token.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => {
            if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            match token.len() {
                1 | 2 => (token.parse::<u32>().ok()?, 0),
                3 | 4 => {
                    let split = token.len() - 2;
                    (
                        token[..split].parse::<u32>().ok()?,
                        token[split..].parse::<u32>().ok()?,
                    )
                }
                _ => return None,
            }
        }
    };

    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

/// Resolves a shift label to its rule group.
///
/// Matching order: exact normalized pattern match against each group's
/// pattern list (skipping the wildcard sentinel), then the company's
/// alternate alias map, then the first group whose pattern list contains the
/// wildcard. Returns `None` when nothing matches; the caller must treat the
/// record as unrated.
pub fn resolve_shift_group<'a>(
    label: &str,
    config: &'a CompanyConfig,
) -> Option<&'a ShiftRuleGroup> {
    let key = normalize_shift_label(label);

    for group in &config.shift_groups {
        if group
            .patterns
            .iter()
            .filter(|p| p.as_str() != WILDCARD_PATTERN)
            .any(|p| normalize_shift_label(p) == key)
        {
            return Some(group);
        }
    }

    if let Some(group_name) = config.shift_aliases.get(&key)
        && let Some(group) = config.group(group_name)
    {
        return Some(group);
    }

    config.shift_groups.iter().find(|g| g.has_wildcard())
}
