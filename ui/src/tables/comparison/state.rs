//! State machine behind the supplier comparison table: sort order, visible
//! columns, the freeze boundary and the column menu.
//!
//! Everything here is synchronous. A fresh state is created whenever the table
//! mounts, starting unsorted with every header visible and nothing frozen.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::schema::{supplier_headers, CellValue, FlatRow, CORE_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

/// Named column sets offered in the column menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Core,
    Suppliers,
}

impl ColumnGroup {
    pub const ALL: [ColumnGroup; 2] = [ColumnGroup::Core, ColumnGroup::Suppliers];

    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Suppliers => "Suppliers",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonViewState {
    headers: Vec<String>,
    supplier_headers: Vec<String>,
    sort: Option<SortConfig>,
    visible: HashSet<String>,
    freeze_until: Option<String>,
    dropdown_open: bool,
}

impl ComparisonViewState {
    pub fn new(headers: &[String]) -> Self {
        Self {
            headers: headers.to_vec(),
            supplier_headers: supplier_headers(headers),
            sort: None,
            visible: headers.iter().cloned().collect(),
            freeze_until: None,
            dropdown_open: false,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn supplier_headers(&self) -> &[String] {
        &self.supplier_headers
    }

    // --- sorting ---------------------------------------------------------

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Header click: same column flips direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, header: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == header => SortConfig {
                direction: current.direction.flipped(),
                ..current
            },
            _ => SortConfig {
                key: header.to_string(),
                direction: SortDirection::Asc,
            },
        });
    }

    /// ▲/▼ for the sorted column, empty for the rest.
    pub fn sort_marker(&self, header: &str) -> &'static str {
        match &self.sort {
            Some(config) if config.key == header => config.direction.marker(),
            _ => "",
        }
    }

    /// Rows in display order. The input slice is never reordered.
    pub fn sorted_rows<'a>(&self, rows: &'a [FlatRow]) -> Vec<&'a FlatRow> {
        let mut ordered: Vec<&FlatRow> = rows.iter().collect();
        if let Some(config) = &self.sort {
            ordered.sort_by(|a, b| {
                let ordering = compare_cells(a.get(&config.key), b.get(&config.key));
                match config.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        ordered
    }

    // --- visibility ------------------------------------------------------

    pub fn is_visible(&self, header: &str) -> bool {
        self.visible.contains(header)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible headers in full header order.
    pub fn visible_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| self.visible.contains(h.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn toggle_column(&mut self, header: &str) {
        if !self.visible.remove(header) {
            self.visible.insert(header.to_string());
        }
    }

    pub fn group_columns(&self, group: ColumnGroup) -> Vec<&str> {
        match group {
            ColumnGroup::Core => CORE_COLUMNS.to_vec(),
            ColumnGroup::Suppliers => self.supplier_headers.iter().map(String::as_str).collect(),
        }
    }

    pub fn group_fully_selected(&self, group: ColumnGroup) -> bool {
        self.group_columns(group)
            .iter()
            .all(|column| self.visible.contains(*column))
    }

    /// Label of the group's bulk action: "None" clears a full group, "All" fills it.
    pub fn group_action_label(&self, group: ColumnGroup) -> &'static str {
        if self.group_fully_selected(group) {
            "None"
        } else {
            "All"
        }
    }

    pub fn apply_group_action(&mut self, group: ColumnGroup) {
        let columns: Vec<String> = self
            .group_columns(group)
            .into_iter()
            .map(str::to_string)
            .collect();

        if self.group_fully_selected(group) {
            for column in &columns {
                self.visible.remove(column);
            }
        } else {
            self.visible.extend(columns);
        }
    }

    // --- freezing --------------------------------------------------------

    pub fn freeze_until(&self) -> Option<&str> {
        self.freeze_until.as_deref()
    }

    /// Selection from the freeze control; an empty value means "None".
    pub fn set_freeze_until(&mut self, selection: &str) {
        self.freeze_until = if selection.is_empty() {
            None
        } else {
            Some(selection.to_string())
        };
    }

    /// Position of the frozen column in the full header order.
    pub fn frozen_index(&self) -> Option<usize> {
        let target = self.freeze_until.as_deref()?;
        self.headers.iter().position(|h| h == target)
    }

    // --- column menu -----------------------------------------------------

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }
}

/// Numbers compare numerically, anything else as text. Absent cells sort
/// after every present value.
fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
    };
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => locale_compare(&a.to_string(), &b.to_string()),
    }
}

/// Case-insensitive first; on a tie lowercase sorts before uppercase.
///
/// Plain code-point order after folding: accented letters land after `z`.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{COMPARISON_HEADERS, ITEM_CODE, MATERIAL, QUANTITY};

    fn headers() -> Vec<String> {
        COMPARISON_HEADERS.iter().map(|h| h.to_string()).collect()
    }

    fn row(code: &str, material: &str, qty: f64) -> FlatRow {
        FlatRow::new()
            .with(ITEM_CODE, CellValue::Text(code.into()))
            .with(MATERIAL, CellValue::Text(material.into()))
            .with(QUANTITY, CellValue::Number(qty))
    }

    fn codes(rows: &[&FlatRow]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get(ITEM_CODE).map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn initial_state_shows_everything_unsorted() {
        let state = ComparisonViewState::new(&headers());
        assert_eq!(state.visible_count(), 9);
        assert!(state.sort().is_none());
        assert_eq!(state.frozen_index(), None);
        assert!(!state.dropdown_open());
        assert_eq!(state.supplier_headers().len(), 5);
    }

    #[test]
    fn sort_toggle_cycle() {
        let mut state = ComparisonViewState::new(&headers());

        state.toggle_sort(QUANTITY);
        assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Asc));
        assert_eq!(state.sort_marker(QUANTITY), "▲");

        state.toggle_sort(QUANTITY);
        assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert_eq!(state.sort_marker(QUANTITY), "▼");

        state.toggle_sort(QUANTITY);
        assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Asc));

        state.toggle_sort(MATERIAL);
        let sort = state.sort().unwrap();
        assert_eq!(sort.key, MATERIAL);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(state.sort_marker(QUANTITY), "");
    }

    #[test]
    fn numeric_sort_in_both_directions() {
        let rows = vec![row("a", "m", 10.0), row("b", "m", 2.0), row("c", "m", 33.0)];
        let mut state = ComparisonViewState::new(&headers());

        state.toggle_sort(QUANTITY);
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["b", "a", "c"]);

        state.toggle_sort(QUANTITY);
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["c", "a", "b"]);

        // source order untouched
        assert_eq!(rows[0].get(ITEM_CODE), Some(&CellValue::Text("a".into())));
    }

    #[test]
    fn text_sort_ignores_case() {
        let rows = vec![
            row("1", "valve", 1.0),
            row("2", "Bolt", 1.0),
            row("3", "anchor", 1.0),
        ];
        let mut state = ComparisonViewState::new(&headers());
        state.toggle_sort(MATERIAL);
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["3", "2", "1"]);
    }

    #[test]
    fn unsorted_rows_keep_input_order() {
        let rows = vec![row("z", "m", 1.0), row("a", "m", 2.0)];
        let state = ComparisonViewState::new(&headers());
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["z", "a"]);
    }

    #[test]
    fn absent_cells_sort_last_ascending_and_first_descending() {
        let supplier = "Supplier 2 (Rate)";
        let rows = vec![
            row("absent", "m", 1.0),
            row("has", "m", 2.0).with(supplier, CellValue::Number(4.5)),
            row("low", "m", 3.0).with(supplier, CellValue::Number(0.5)),
        ];
        let mut state = ComparisonViewState::new(&headers());

        state.toggle_sort(supplier);
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["low", "has", "absent"]);

        state.toggle_sort(supplier);
        assert_eq!(codes(&state.sorted_rows(&rows)), vec!["absent", "has", "low"]);
    }

    #[test]
    fn locale_compare_puts_lowercase_first_on_ties() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn toggling_a_column_flips_membership() {
        let mut state = ComparisonViewState::new(&headers());
        state.toggle_column(MATERIAL);
        assert!(!state.is_visible(MATERIAL));
        assert!(!state.visible_headers().contains(&MATERIAL));
        state.toggle_column(MATERIAL);
        assert!(state.is_visible(MATERIAL));
        assert_eq!(state.visible_headers()[1], MATERIAL);
    }

    #[test]
    fn supplier_group_action_toggles_whole_group() {
        let mut state = ComparisonViewState::new(&headers());
        assert!(state.group_fully_selected(ColumnGroup::Suppliers));
        assert_eq!(state.group_action_label(ColumnGroup::Suppliers), "None");

        state.apply_group_action(ColumnGroup::Suppliers);
        assert_eq!(state.visible_count(), 4);
        assert_eq!(state.group_action_label(ColumnGroup::Suppliers), "All");

        state.apply_group_action(ColumnGroup::Suppliers);
        assert_eq!(state.visible_count(), 9);
    }

    #[test]
    fn partially_selected_group_offers_select_all() {
        let mut state = ComparisonViewState::new(&headers());
        state.toggle_column(QUANTITY);
        assert_eq!(state.group_action_label(ColumnGroup::Core), "All");

        state.apply_group_action(ColumnGroup::Core);
        assert!(state.is_visible(QUANTITY));
        assert_eq!(state.visible_count(), 9);
    }

    #[test]
    fn freeze_uses_full_header_order() {
        let mut state = ComparisonViewState::new(&headers());
        state.toggle_column(ITEM_CODE);
        state.set_freeze_until(QUANTITY);
        assert_eq!(state.freeze_until(), Some(QUANTITY));
        assert_eq!(state.frozen_index(), Some(2));

        state.set_freeze_until("");
        assert_eq!(state.frozen_index(), None);
    }

    #[test]
    fn unknown_freeze_target_freezes_nothing() {
        let mut state = ComparisonViewState::new(&headers());
        state.set_freeze_until("Nope");
        assert_eq!(state.frozen_index(), None);
    }

    #[test]
    fn dropdown_open_close() {
        let mut state = ComparisonViewState::new(&headers());
        state.toggle_dropdown();
        assert!(state.dropdown_open());
        state.toggle_dropdown();
        assert!(!state.dropdown_open());
        state.toggle_dropdown();
        state.close_dropdown();
        assert!(!state.dropdown_open());
    }
}
