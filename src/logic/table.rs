//! Table presentation: filter, sort, column visibility, row selection and pagination.
//!
//! None of this state touches the roster or storage. [`TableState::view`] re-derives the
//! visible rows from scratch on every call.

use crate::models::{Player, PlayerKey, RosterEntry, RosterStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Shown in place of rows when the current page is empty.
pub const EMPTY_MESSAGE: &str = "No results.";

/// Table columns, in display order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Select,
    Name,
    Id,
    VipSlots,
    MatchSlots,
    Actions,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Select,
        Column::Name,
        Column::Id,
        Column::VipSlots,
        Column::MatchSlots,
        Column::Actions,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Column::Select => "select",
            Column::Name => "name",
            Column::Id => "id",
            Column::VipSlots => "vipSlots",
            Column::MatchSlots => "matchSlots",
            Column::Actions => "actions",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.id() == s)
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Select | Column::Actions => "",
            Column::Name => "Name",
            Column::Id => "ID",
            Column::VipSlots => "Slot VIP",
            Column::MatchSlots => "Slot Match",
        }
    }

    /// The checkbox and action columns are always shown.
    pub fn can_hide(self) -> bool {
        !matches!(self, Column::Select | Column::Actions)
    }

    pub fn can_sort(self) -> bool {
        self.can_hide()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The single active sort.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sorting {
    pub column: Column,
    pub direction: SortDirection,
}

/// Tri-state of a checkbox (the header "select page" box can be indeterminate).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

/// Presentation-only state of the roster table.
#[derive(Clone, Debug)]
pub struct TableState {
    filter: String,
    sorting: Option<Sorting>,
    hidden: HashSet<Column>,
    selected: HashSet<PlayerKey>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: String::new(),
            sorting: None,
            hidden: HashSet::new(),
            selected: HashSet::new(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sorting(&self) -> Option<Sorting> {
        self.sorting
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_visible(&self, column: Column) -> bool {
        !self.hidden.contains(&column)
    }

    pub fn is_selected(&self, key: PlayerKey) -> bool {
        self.selected.contains(&key)
    }

    /// Set the name filter and go back to the first page.
    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.filter = value.into();
        self.page_index = 0;
    }

    /// Header click: ascending, unless the column is already ascending, then descending.
    /// Returns false for columns that cannot be sorted.
    pub fn toggle_sort(&mut self, column: Column) -> bool {
        if !column.can_sort() {
            return false;
        }
        let direction = match self.sorting {
            Some(Sorting {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sorting = Some(Sorting { column, direction });
        self.page_index = 0;
        true
    }

    /// Show or hide a column. Returns false for columns that cannot be hidden.
    pub fn set_column_visible(&mut self, column: Column, visible: bool) -> bool {
        if !column.can_hide() {
            return false;
        }
        if visible {
            self.hidden.remove(&column);
        } else {
            self.hidden.insert(column);
        }
        true
    }

    pub fn set_row_selected(&mut self, key: PlayerKey, selected: bool) {
        if selected {
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
    }

    /// Select or deselect every row on the current page.
    pub fn set_page_selected(&mut self, roster: &RosterStore, selected: bool) {
        let keys: Vec<PlayerKey> = self.page_rows(roster).iter().map(|(_, e)| e.key).collect();
        for key in keys {
            self.set_row_selected(key, selected);
        }
    }

    pub fn next_page(&mut self, roster: &RosterStore) -> bool {
        if self.page_index + 1 < self.page_count(roster) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Drop selections of rows that no longer exist and pull the page back in range.
    pub fn sync_with(&mut self, roster: &RosterStore) {
        self.selected.retain(|key| roster.position_of(*key).is_some());
        self.page_index = self.page_index.min(self.page_count(roster).saturating_sub(1));
    }

    pub fn page_count(&self, roster: &RosterStore) -> usize {
        self.filtered_sorted(roster).len().div_ceil(self.page_size)
    }

    /// Rows matching the filter, in display order, with their stored positions.
    pub fn filtered_sorted<'a>(&self, roster: &'a RosterStore) -> Vec<(usize, &'a RosterEntry)> {
        let needle = self.filter.to_lowercase();
        let mut rows: Vec<(usize, &RosterEntry)> = roster
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| needle.is_empty() || e.player.name.to_lowercase().contains(&needle))
            .collect();
        if let Some(sorting) = self.sorting {
            rows.sort_by(|(_, a), (_, b)| compare_players(&a.player, &b.player, sorting));
        }
        rows
    }

    fn page_rows<'a>(&self, roster: &'a RosterStore) -> Vec<(usize, &'a RosterEntry)> {
        let rows = self.filtered_sorted(roster);
        let page_count = rows.len().div_ceil(self.page_size);
        let page_index = self.page_index.min(page_count.saturating_sub(1));
        rows.into_iter()
            .skip(page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Derive the full table view from the roster and this state.
    pub fn view(&self, roster: &RosterStore) -> TableView {
        let filtered = self.filtered_sorted(roster);
        let filtered_count = filtered.len();
        let selected_count = filtered
            .iter()
            .filter(|(_, e)| self.selected.contains(&e.key))
            .count();
        let page_count = filtered_count.div_ceil(self.page_size);
        let page_index = self.page_index.min(page_count.saturating_sub(1));

        let rows: Vec<RowView> = self
            .page_rows(roster)
            .into_iter()
            .map(|(position, entry)| RowView::new(position, entry, self.is_selected(entry.key)))
            .collect();

        let page_selected = rows.iter().filter(|r| r.selected).count();
        let header_selection = if rows.is_empty() || page_selected == 0 {
            CheckState::Unchecked
        } else if page_selected == rows.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        };

        let columns = Column::ALL
            .into_iter()
            .map(|column| ColumnView {
                column,
                header: column.header(),
                visible: self.is_visible(column),
                can_hide: column.can_hide(),
                can_sort: column.can_sort(),
                sort: self
                    .sorting
                    .filter(|s| s.column == column)
                    .map(|s| s.direction),
            })
            .collect();

        TableView {
            columns,
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
            filter: self.filter.clone(),
            header_selection,
            selected_count,
            filtered_count,
            total_count: roster.len(),
            selection_label: format!("{} of {} row(s) selected.", selected_count, filtered_count),
            page_index,
            page_count,
            can_previous_page: page_index > 0,
            can_next_page: page_index + 1 < page_count,
        }
    }
}

fn compare_players(a: &Player, b: &Player, sorting: Sorting) -> Ordering {
    let directed = |ord: Ordering| match sorting.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };
    match sorting.column {
        Column::Name => directed(natural_cmp(&a.name, &b.name)),
        Column::VipSlots => directed(a.vip_slots.cmp(&b.vip_slots)),
        Column::MatchSlots => directed(a.match_slots.cmp(&b.match_slots)),
        // Missing ids rank above every id: last ascending, first descending.
        Column::Id => directed(match (a.id, b.id) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        Column::Select | Column::Actions => Ordering::Equal,
    }
}

/// Case-insensitive comparison where runs of digits compare by numeric value
/// ("p2" < "P10").
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let da = take_digits(&mut ai);
                let db = take_digits(&mut bi);
                let ta = da.trim_start_matches('0');
                let tb = db.trim_start_matches('0');
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

/// One column's header state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub column: Column,
    pub header: &'static str,
    pub visible: bool,
    pub can_hide: bool,
    pub can_sort: bool,
    pub sort: Option<SortDirection>,
}

/// One rendered row. `position` is the row's index in the stored roster, not on the page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub key: PlayerKey,
    pub position: usize,
    pub selected: bool,
    pub name: String,
    pub id: Option<i64>,
    /// `-` when the player has no id.
    pub id_display: String,
    pub vip_slots: u32,
    pub match_slots: u32,
    pub summary: String,
}

impl RowView {
    fn new(position: usize, entry: &RosterEntry, selected: bool) -> Self {
        let p = &entry.player;
        Self {
            key: entry.key,
            position,
            selected,
            name: p.name.clone(),
            id: p.id,
            id_display: p.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            vip_slots: p.vip_slots,
            match_slots: p.match_slots,
            summary: p.summary(),
        }
    }
}

/// Everything needed to render the table for the current state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub empty_message: Option<&'static str>,
    pub filter: String,
    pub header_selection: CheckState,
    pub selected_count: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub selection_label: String,
    pub page_index: usize,
    pub page_count: usize,
    pub can_previous_page: bool,
    pub can_next_page: bool,
}
