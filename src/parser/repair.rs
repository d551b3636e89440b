//! Cell repair for mis-split column boundaries.
//!
//! Text extraction merges the last cell of each column slice with text that
//! belongs at the top of the next slice, and sometimes emits a typographic
//! minus sign. Every slice's trailing cell is run through an ordered list of
//! rules. A rule that fires truncates the cell to its valid form and hands
//! the remainder (the spillover) to the front of the next slice.
//!
//! Rules run in a fixed sequence and each sees the cell as left by the
//! previous one, so several may fire on the same cell.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::RawGrid;

use super::schema::{ColumnKind, ColumnSpec, RAIN_TYPE_CODES};

/// Minus sign glyph (U+2212) some reports use instead of `-`.
pub const MINUS_GLYPH: char = '\u{2212}';

/// A single correction rule for a trailing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRule {
    /// Split on the minus glyph, keep the first value, forward the last.
    ///
    /// A lone value is both first and last, so it is kept and forwarded.
    MinusSign,
    /// Split on the first space, forward the second part.
    Whitespace,
    /// Separate decimal values that ran together, forward the second.
    MultiDecimal,
    /// Keep one fractional digit, forward the rest.
    DecimalOverflow,
    /// Clear anything that is not a rain-type code and forward it.
    RainTypeCode,
    /// Cap a code at the given width, forward the rest.
    WidthCap(usize),
}

/// Outcome of a rule that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRepair {
    /// Cell text to keep
    pub corrected: String,
    /// Text to move to the next slice
    pub spillover: Option<String>,
}

impl CellRepair {
    fn new(corrected: impl Into<String>, spillover: Option<String>) -> Self {
        Self {
            corrected: corrected.into(),
            spillover,
        }
    }
}

impl CellRule {
    /// Rules for a column kind, in the order they are applied.
    pub fn for_kind(kind: ColumnKind) -> Vec<CellRule> {
        let mut rules = vec![
            CellRule::MinusSign,
            CellRule::Whitespace,
            CellRule::MultiDecimal,
            CellRule::DecimalOverflow,
        ];
        match kind {
            ColumnKind::RainType => rules.push(CellRule::RainTypeCode),
            ColumnKind::Code(width) => rules.push(CellRule::WidthCap(width)),
            ColumnKind::Day | ColumnKind::Numeric => {}
        }
        rules
    }

    /// Short rule name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CellRule::MinusSign => "minus-sign",
            CellRule::Whitespace => "whitespace",
            CellRule::MultiDecimal => "multi-decimal",
            CellRule::DecimalOverflow => "decimal-overflow",
            CellRule::RainTypeCode => "rain-type-code",
            CellRule::WidthCap(_) => "width-cap",
        }
    }

    /// Apply the rule to a cell.
    ///
    /// Returns `None` if the rule's trigger does not match.
    pub fn apply(&self, cell: &str) -> Option<CellRepair> {
        match self {
            CellRule::MinusSign => split_minus_sign(cell),
            CellRule::Whitespace => split_whitespace(cell),
            CellRule::MultiDecimal => split_decimal_runs(cell),
            CellRule::DecimalOverflow => truncate_fraction(cell),
            CellRule::RainTypeCode => clear_rain_type(cell),
            CellRule::WidthCap(width) => cap_width(cell, *width),
        }
    }
}

fn split_minus_sign(cell: &str) -> Option<CellRepair> {
    if !cell.contains(MINUS_GLYPH) {
        return None;
    }

    let spaced = cell.replace(MINUS_GLYPH, " -");
    let fragments: Vec<&str> = spaced.split(' ').filter(|f| !f.is_empty()).collect();
    let first = *fragments.first()?;
    let last = fragments.last()?.to_string();
    Some(CellRepair::new(first, Some(last)))
}

fn split_whitespace(cell: &str) -> Option<CellRepair> {
    let mut parts = cell.split(' ');
    let first = parts.next()?;
    let second = parts.next()?;
    Some(CellRepair::new(first, Some(second.to_string())))
}

fn decimal_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\d+").expect("decimal run pattern is valid"))
}

/// Insert a space after every decimal run not directly followed by `.`.
///
/// A run followed by another `.` gives up its last digit, so `1.25.3`
/// becomes `1.2 5.3 `.
fn separate_decimal_runs(cell: &str) -> String {
    let mut output = String::with_capacity(cell.len() + 4);
    let mut copied = 0;

    for m in decimal_run_regex().find_iter(cell) {
        let mut end = m.end();
        if cell[end..].starts_with('.') {
            let last_digit = m.as_str().chars().next_back().map_or(0, char::len_utf8);
            end -= last_digit;
            if end <= m.start() + 1 {
                continue;
            }
        }
        output.push_str(&cell[copied..end]);
        output.push(' ');
        copied = end;
    }

    output.push_str(&cell[copied..]);
    output
}

fn split_decimal_runs(cell: &str) -> Option<CellRepair> {
    if !cell.contains('.') || cell.chars().count() <= 4 {
        return None;
    }

    let separated = separate_decimal_runs(cell);
    let parts: Vec<&str> = separated.split(' ').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [first, second, ..] => Some(CellRepair::new(*first, Some(second.to_string()))),
        _ => None,
    }
}

fn truncate_fraction(cell: &str) -> Option<CellRepair> {
    if !cell.contains('.') {
        return None;
    }

    let parts: Vec<&str> = cell.split('.').collect();
    let fraction = parts.last()?;
    if fraction.chars().count() <= 1 {
        return None;
    }

    let digit = parts.get(1)?.chars().next()?;
    let kept = format!("{}.{}", parts[0], digit);
    let remainder = cell.strip_prefix(kept.as_str())?;
    let spillover = (!remainder.is_empty()).then(|| remainder.to_string());
    Some(CellRepair::new(kept, spillover))
}

fn clear_rain_type(cell: &str) -> Option<CellRepair> {
    if cell.is_empty() || RAIN_TYPE_CODES.contains(&cell) {
        return None;
    }
    Some(CellRepair::new("", Some(cell.to_string())))
}

fn cap_width(cell: &str, width: usize) -> Option<CellRepair> {
    let (split, _) = cell.char_indices().nth(width)?;
    Some(CellRepair::new(
        &cell[..split],
        Some(cell[split..].to_string()),
    ))
}

/// A rule that fired during a repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairEvent {
    /// Column slice whose trailing cell was repaired
    pub column: usize,
    /// Rule that fired
    pub rule: CellRule,
    /// Cell text before the rule
    pub before: String,
    /// Cell text after the rule
    pub after: String,
    /// Text handed to the next slice
    pub spillover: Option<String>,
}

/// Summary of a repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    /// Fired rules in application order
    pub events: Vec<RepairEvent>,
    /// Spillover past the last slice, which has nowhere to go
    pub dropped: Vec<String>,
}

impl RepairReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no rule fired.
    pub fn is_clean(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of fragments moved between slices.
    pub fn spill_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.spillover.is_some())
            .count()
            - self.dropped.len()
    }
}

/// Run every applicable rule over a trailing cell of `column`.
///
/// Returns the corrected cell and the rules that fired.
pub fn repair_tail(column: usize, cell: &str) -> (String, Vec<RepairEvent>) {
    let kind = ColumnSpec::at(column).map_or(ColumnKind::Numeric, |spec| spec.kind);
    let mut current = cell.to_string();
    let mut events = Vec::new();

    for rule in CellRule::for_kind(kind) {
        if let Some(repair) = rule.apply(&current) {
            log::debug!(
                "repair: column {} {} {:?} -> {:?} (spill {:?})",
                column,
                rule.name(),
                current,
                repair.corrected,
                repair.spillover
            );
            events.push(RepairEvent {
                column,
                rule,
                before: std::mem::replace(&mut current, repair.corrected.clone()),
                after: repair.corrected,
                spillover: repair.spillover,
            });
        }
    }

    (current, events)
}

/// Repair a sliced grid in place.
///
/// Slices are visited left to right. Each spillover is inserted at index 0
/// of the following slice, so a later rule's fragment lands ahead of an
/// earlier one. Every minus glyph in a visited slice is replaced with `-`.
pub fn repair_grid(grid: &mut RawGrid) -> RepairReport {
    let mut report = RepairReport::new();

    for index in 0..grid.column_count() {
        let mut spillover = Vec::new();

        if let Some(column) = grid.column_mut(index) {
            if let Some(tail) = column.last_mut() {
                let (corrected, events) = repair_tail(index, tail.as_str());
                *tail = corrected;
                spillover.extend(events.iter().filter_map(|e| e.spillover.clone()));
                report.events.extend(events);
            }

            for cell in column.iter_mut() {
                if cell.contains(MINUS_GLYPH) {
                    *cell = cell.replace(MINUS_GLYPH, "-");
                }
            }
        }

        match grid.column_mut(index + 1) {
            Some(next) => {
                for fragment in spillover {
                    next.insert(0, fragment);
                }
            }
            None if !spillover.is_empty() => {
                log::warn!(
                    "repair: dropping {:?} past the last column",
                    spillover
                );
                report.dropped.extend(spillover);
            }
            None => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{COLUMN_COUNT, ROW_COUNT};

    fn repaired(rule: CellRule, cell: &str) -> (String, Option<String>) {
        let repair = rule.apply(cell).expect("rule should fire");
        (repair.corrected, repair.spillover)
    }

    fn clean_grid() -> RawGrid {
        let rows = (1..=ROW_COUNT).map(|day| {
            vec![
                day.to_string(),
                "-1.5".to_string(),
                "2.3".to_string(),
                "-12.4".to_string(),
                "0.4".to_string(),
                (if day % 3 == 0 { "sn" } else { "" }).to_string(),
                "12".to_string(),
                "3".to_string(),
                "10.5".to_string(),
                "5.2".to_string(),
                "9".to_string(),
                "14".to_string(),
            ]
        });
        RawGrid::from_rows(rows)
    }

    #[test]
    fn test_minus_sign_rule() {
        assert_eq!(
            repaired(CellRule::MinusSign, "\u{2212}5 3"),
            ("-5".to_string(), Some("3".to_string()))
        );
        assert_eq!(
            repaired(CellRule::MinusSign, "1.2\u{2212}0.5"),
            ("1.2".to_string(), Some("-0.5".to_string()))
        );
        assert!(CellRule::MinusSign.apply("-5 3").is_none());
    }

    #[test]
    fn test_minus_sign_single_value_is_forwarded() {
        assert_eq!(
            repaired(CellRule::MinusSign, "\u{2212}5"),
            ("-5".to_string(), Some("-5".to_string()))
        );

        let mut grid = RawGrid::from_columns(vec![vec!["\u{2212}1.2".into()], vec!["x".into()]]);
        repair_grid(&mut grid);
        assert_eq!(grid.column(0).unwrap(), ["-1.2"]);
        assert_eq!(grid.column(1).unwrap(), ["-1.2", "x"]);
    }

    #[test]
    fn test_whitespace_rule() {
        assert_eq!(
            repaired(CellRule::Whitespace, "31 4.2"),
            ("31".to_string(), Some("4.2".to_string()))
        );
        // Only the second part moves on
        assert_eq!(
            repaired(CellRule::Whitespace, "1 2 3"),
            ("1".to_string(), Some("2".to_string()))
        );
        assert!(CellRule::Whitespace.apply("31").is_none());
    }

    #[test]
    fn test_separate_decimal_runs() {
        assert_eq!(separate_decimal_runs("12.3-4.5"), "12.3 -4.5 ");
        assert_eq!(separate_decimal_runs("1.25.3"), "1.2 5.3 ");
        assert_eq!(separate_decimal_runs("12.345"), "12.345 ");
        assert_eq!(separate_decimal_runs("1.2.3"), "1.2.3 ");
        assert_eq!(separate_decimal_runs("abc"), "abc");
    }

    #[test]
    fn test_multi_decimal_rule() {
        assert_eq!(
            repaired(CellRule::MultiDecimal, "12.3-4.5"),
            ("12.3".to_string(), Some("-4.5".to_string()))
        );
        assert_eq!(
            repaired(CellRule::MultiDecimal, "1.25.3"),
            ("1.2".to_string(), Some("5.3".to_string()))
        );
        // A single run has nothing to separate
        assert!(CellRule::MultiDecimal.apply("12.345").is_none());
        assert!(CellRule::MultiDecimal.apply("-12.4").is_none());
        assert!(CellRule::MultiDecimal.apply("1.23").is_none());
    }

    #[test]
    fn test_decimal_overflow_rule() {
        assert_eq!(
            repaired(CellRule::DecimalOverflow, "12.345"),
            ("12.3".to_string(), Some("45".to_string()))
        );
        assert_eq!(
            repaired(CellRule::DecimalOverflow, "1.2.34"),
            ("1.2".to_string(), Some(".34".to_string()))
        );
        assert!(CellRule::DecimalOverflow.apply("12.3").is_none());
        assert!(CellRule::DecimalOverflow.apply("123").is_none());
    }

    #[test]
    fn test_rain_type_rule() {
        assert_eq!(
            repaired(CellRule::RainTypeCode, "xx"),
            (String::new(), Some("xx".to_string()))
        );
        for code in ["sn", "sl", "ri", ""] {
            assert!(CellRule::RainTypeCode.apply(code).is_none());
        }
    }

    #[test]
    fn test_width_cap_rule() {
        assert_eq!(
            repaired(CellRule::WidthCap(2), "123"),
            ("12".to_string(), Some("3".to_string()))
        );
        assert_eq!(
            repaired(CellRule::WidthCap(1), "42"),
            ("4".to_string(), Some("2".to_string()))
        );
        assert!(CellRule::WidthCap(2).apply("12").is_none());
        assert!(CellRule::WidthCap(1).apply("").is_none());
    }

    #[test]
    fn test_rules_per_kind() {
        assert_eq!(CellRule::for_kind(ColumnKind::Numeric).len(), 4);
        assert_eq!(
            CellRule::for_kind(ColumnKind::RainType).last(),
            Some(&CellRule::RainTypeCode)
        );
        assert_eq!(
            CellRule::for_kind(ColumnKind::Code(2)).last(),
            Some(&CellRule::WidthCap(2))
        );
    }

    #[test]
    fn test_rules_fire_in_sequence() {
        // Decimal overflow leaves "1.2", which is still not a rain-type code
        let (cell, events) = repair_tail(5, "1.25");
        assert_eq!(cell, "");
        let rules: Vec<CellRule> = events.iter().map(|e| e.rule).collect();
        assert_eq!(
            rules,
            vec![CellRule::DecimalOverflow, CellRule::RainTypeCode]
        );
        assert_eq!(events[0].spillover.as_deref(), Some("5"));
        assert_eq!(events[1].before, "1.2");
        assert_eq!(events[1].spillover.as_deref(), Some("1.2"));
    }

    #[test]
    fn test_repair_grid_forwards_to_next_slice() {
        let mut grid = RawGrid::from_columns(vec![
            vec!["1".into(), "2 3.5".into()],
            vec!["4.1".into()],
            vec!["\u{2212}2".into(), "7".into()],
        ]);

        let report = repair_grid(&mut grid);

        assert_eq!(grid.column(0).unwrap(), ["1", "2"]);
        assert_eq!(grid.column(1).unwrap(), ["3.5", "4.1"]);
        assert_eq!(grid.column(2).unwrap(), ["-2", "7"]);
        assert_eq!(report.events.len(), 1);
        assert!(report.dropped.is_empty());
        assert_eq!(report.spill_count(), 1);
    }

    #[test]
    fn test_later_spillover_lands_first() {
        let mut grid = RawGrid::new();
        for _ in 0..5 {
            grid.push_column(vec!["0".into()]);
        }
        grid.push_column(vec!["1.25".into()]);
        grid.push_column(vec!["9".into()]);

        repair_grid(&mut grid);

        assert_eq!(grid.column(5).unwrap(), [""]);
        assert_eq!(grid.column(6).unwrap(), ["1.2", "5", "9"]);
    }

    #[test]
    fn test_spillover_past_last_column_is_dropped() {
        let mut grid = RawGrid::from_columns(vec![vec!["1".into()], vec!["2 3".into()]]);

        let report = repair_grid(&mut grid);

        assert_eq!(grid.row_counts(), vec![1, 1]);
        assert_eq!(grid.column(1).unwrap(), ["2"]);
        assert_eq!(report.dropped, vec!["3".to_string()]);
        assert_eq!(report.spill_count(), 0);
    }

    #[test]
    fn test_minus_glyph_normalized_everywhere() {
        let mut grid = RawGrid::from_columns(vec![
            vec!["\u{2212}1.0".into(), "\u{2212}3.2".into(), "4".into()],
            vec!["5".into()],
        ]);

        repair_grid(&mut grid);

        assert_eq!(grid.column(0).unwrap(), ["-1.0", "-3.2", "4"]);
        assert_eq!(grid.column(1).unwrap(), ["5"]);
    }

    #[test]
    fn test_clean_grid_is_untouched() {
        let mut grid = clean_grid();
        let before = grid.clone();

        let report = repair_grid(&mut grid);

        assert!(report.is_clean());
        assert_eq!(grid, before);
        assert!(grid.is_rectangular(ROW_COUNT));
        assert_eq!(grid.column_count(), COLUMN_COUNT);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let mut grid = clean_grid();
        let tail = grid.column_mut(0).unwrap();
        tail.pop();
        tail.push("31 \u{2212}1.5".into());
        grid.column_mut(1).unwrap().remove(0);

        let first = repair_grid(&mut grid);
        assert!(!first.is_clean());
        assert!(grid.is_rectangular(ROW_COUNT));
        assert_eq!(grid, clean_grid());

        let second = repair_grid(&mut grid);
        assert!(second.is_clean());
        assert_eq!(grid, clean_grid());
    }
}
