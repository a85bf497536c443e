//! Integration tests for the table view: filter, sort, visibility, selection, pagination, and
//! the page actions that map rows back to stored records.

use roster_widget::{
    CheckState, Column, Counter, InputField, MemoryStorage, Player, PlayerInput, RosterPage,
    RosterStorage, RosterStore, SortDirection, TableState, EMPTY_MESSAGE,
};

fn store_of(players: &[Player]) -> RosterStore {
    let mut storage = MemoryStorage::new();
    storage.save(players).unwrap();
    RosterStore::load(Box::new(storage))
}

fn page_of(players: &[Player], page_size: usize) -> (RosterPage, MemoryStorage) {
    let mut storage = MemoryStorage::new();
    storage.save(players).unwrap();
    (RosterPage::load(Box::new(storage.clone()), page_size), storage)
}

fn names(table: &TableState, store: &RosterStore) -> Vec<String> {
    table.view(store).rows.into_iter().map(|r| r.name).collect()
}

fn numbered(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"), Some(i as i64), 0, 0)).collect()
}

#[test]
fn empty_filter_returns_all_rows() {
    let store = store_of(&[
        Player::new("Alice", None, 1, 1),
        Player::new("Bob", None, 1, 1),
    ]);
    let table = TableState::default();
    assert_eq!(names(&table, &store), ["Alice", "Bob"]);
}

#[test]
fn filter_matches_name_substrings_ignoring_case() {
    let store = store_of(&[
        Player::new("Alice", None, 1, 1),
        Player::new("Malik", None, 1, 1),
        Player::new("Bob", None, 1, 1),
        Player::new("ALINA", None, 1, 1),
    ]);
    let mut table = TableState::default();
    table.set_filter("li");
    assert_eq!(names(&table, &store), ["Alice", "Malik", "ALINA"]);

    table.set_filter("zzz");
    let view = table.view(&store);
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
    assert_eq!(view.total_count, 4);
}

#[test]
fn filter_does_not_touch_the_roster() {
    let (mut page, storage) = page_of(&[Player::new("Alice", None, 1, 1)], 10);
    let before = storage.raw();
    page.set_filter("nobody");
    assert_eq!(page.roster().len(), 1);
    assert_eq!(storage.raw(), before);
}

#[test]
fn sort_toggles_between_ascending_and_descending() {
    let store = store_of(&[
        Player::new("bob", None, 1, 1),
        Player::new("Alice", None, 1, 1),
        Player::new("carl", None, 1, 1),
    ]);
    let mut table = TableState::default();

    assert!(table.toggle_sort(Column::Name));
    assert_eq!(table.sorting().map(|s| s.direction), Some(SortDirection::Asc));
    assert_eq!(names(&table, &store), ["Alice", "bob", "carl"]);

    table.toggle_sort(Column::Name);
    assert_eq!(table.sorting().map(|s| s.direction), Some(SortDirection::Desc));
    assert_eq!(names(&table, &store), ["carl", "bob", "Alice"]);

    table.toggle_sort(Column::Name);
    assert_eq!(table.sorting().map(|s| s.direction), Some(SortDirection::Asc));

    // Stored order is untouched.
    let stored: Vec<String> = store.players().into_iter().map(|p| p.name).collect();
    assert_eq!(stored, ["bob", "Alice", "carl"]);
}

#[test]
fn switching_column_starts_ascending() {
    let store = store_of(&[
        Player::new("A", None, 3, 1),
        Player::new("B", None, 1, 2),
        Player::new("C", None, 2, 0),
    ]);
    let mut table = TableState::default();
    table.toggle_sort(Column::Name);
    table.toggle_sort(Column::Name);
    table.toggle_sort(Column::VipSlots);
    assert_eq!(names(&table, &store), ["B", "C", "A"]);
    table.toggle_sort(Column::MatchSlots);
    assert_eq!(names(&table, &store), ["C", "A", "B"]);
}

#[test]
fn names_sort_naturally() {
    let store = store_of(&[
        Player::new("P10", None, 0, 0),
        Player::new("p2", None, 0, 0),
        Player::new("P1", None, 0, 0),
    ]);
    let mut table = TableState::default();
    table.toggle_sort(Column::Name);
    assert_eq!(names(&table, &store), ["P1", "p2", "P10"]);
}

#[test]
fn missing_ids_sort_last_ascending_and_first_descending() {
    let store = store_of(&[
        Player::new("none", None, 0, 0),
        Player::new("seven", Some(7), 0, 0),
        Player::new("two", Some(2), 0, 0),
    ]);
    let mut table = TableState::default();
    table.toggle_sort(Column::Id);
    assert_eq!(names(&table, &store), ["two", "seven", "none"]);
    table.toggle_sort(Column::Id);
    assert_eq!(names(&table, &store), ["none", "seven", "two"]);
}

#[test]
fn equal_keys_keep_stored_order() {
    let store = store_of(&[
        Player::new("first", None, 1, 0),
        Player::new("second", None, 1, 0),
        Player::new("zero", None, 0, 0),
    ]);
    let mut table = TableState::default();
    table.toggle_sort(Column::VipSlots);
    assert_eq!(names(&table, &store), ["zero", "first", "second"]);
}

#[test]
fn select_and_actions_are_fixed_columns() {
    let mut table = TableState::default();
    assert!(!table.toggle_sort(Column::Select));
    assert!(!table.set_column_visible(Column::Actions, false));
    assert!(table.is_visible(Column::Actions));

    assert!(table.set_column_visible(Column::Id, false));
    let store = store_of(&[]);
    let view = table.view(&store);
    let id = view.columns.iter().find(|c| c.column == Column::Id).unwrap();
    assert!(!id.visible);
    assert_eq!(id.header, "ID");

    table.set_column_visible(Column::Id, true);
    assert!(table.is_visible(Column::Id));
}

#[test]
fn pagination_bounds() {
    let store = store_of(&numbered(25));
    let mut table = TableState::default();

    let view = table.view(&store);
    assert_eq!(view.page_count, 3);
    assert_eq!(view.rows.len(), 10);
    assert!(!view.can_previous_page);
    assert!(view.can_next_page);

    assert!(table.next_page(&store));
    assert!(table.next_page(&store));
    assert!(!table.next_page(&store));
    let view = table.view(&store);
    assert_eq!(view.page_index, 2);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[0].name, "P20");
    assert!(view.can_previous_page);
    assert!(!view.can_next_page);

    assert!(table.previous_page());
    assert!(table.previous_page());
    assert!(!table.previous_page());
}

#[test]
fn empty_roster_disables_both_page_buttons() {
    let view = TableState::default().view(&store_of(&[]));
    assert_eq!(view.page_count, 0);
    assert!(!view.can_previous_page);
    assert!(!view.can_next_page);
    assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
}

#[test]
fn filter_and_sort_reset_to_first_page() {
    let store = store_of(&numbered(15));
    let mut table = TableState::default();
    table.next_page(&store);
    table.set_filter("P");
    assert_eq!(table.page_index(), 0);
    table.next_page(&store);
    table.toggle_sort(Column::Name);
    assert_eq!(table.page_index(), 0);
}

#[test]
fn selection_counts_filtered_rows() {
    let (mut page, _) = page_of(
        &[
            Player::new("Alice", None, 1, 1),
            Player::new("Bob", None, 1, 1),
            Player::new("Alina", None, 1, 1),
        ],
        10,
    );
    let keys: Vec<_> = page.roster().entries().iter().map(|e| e.key).collect();
    page.set_row_selected(keys[0], true);
    page.set_row_selected(keys[1], true);

    let view = page.view().table;
    assert_eq!(view.selection_label, "2 of 3 row(s) selected.");
    assert_eq!(view.header_selection, CheckState::Indeterminate);

    page.set_filter("Ali");
    let view = page.view().table;
    assert_eq!(view.selected_count, 1);
    assert_eq!(view.filtered_count, 2);
    assert_eq!(view.selection_label, "1 of 2 row(s) selected.");
}

#[test]
fn header_checkbox_selects_current_page_only() {
    let (mut page, _) = page_of(&numbered(5), 2);
    page.set_page_selected(true);
    let view = page.view().table;
    assert_eq!(view.header_selection, CheckState::Checked);
    assert_eq!(view.selection_label, "2 of 5 row(s) selected.");

    page.next_page();
    assert_eq!(page.view().table.header_selection, CheckState::Unchecked);

    page.previous_page();
    page.set_page_selected(false);
    assert_eq!(page.view().table.selected_count, 0);
}

#[test]
fn counter_controls_hit_the_underlying_record_under_sort_and_filter() {
    let (mut page, storage) = page_of(
        &[
            Player::new("Zed", None, 0, 0),
            Player::new("Amy", None, 5, 5),
            Player::new("Max", None, 1, 1),
        ],
        10,
    );
    page.toggle_sort(Column::Name);
    page.set_filter("m");

    let rows = page.view().table.rows;
    assert_eq!(rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["Amy", "Max"]);
    assert_eq!(rows[0].position, 1);

    page.adjust_counter(rows[1].key, Counter::VipSlots, 1);
    page.adjust_counter(rows[0].key, Counter::MatchSlots, -1);

    assert_eq!(
        storage.load(),
        Some(vec![
            Player::new("Zed", None, 0, 0),
            Player::new("Amy", None, 5, 4),
            Player::new("Max", None, 2, 1),
        ])
    );
}

#[test]
fn delete_from_sorted_view_removes_the_right_record() {
    let (mut page, _) = page_of(
        &[
            Player::new("Bob", Some(2), 0, 0),
            Player::new("Alice", Some(1), 0, 0),
        ],
        10,
    );
    page.toggle_sort(Column::Name);
    let first = page.view().table.rows[0].clone();
    assert_eq!(first.name, "Alice");
    page.set_row_selected(first.key, true);

    page.delete_player(first.key);
    assert_eq!(page.roster().players(), vec![Player::new("Bob", Some(2), 0, 0)]);
    assert_eq!(page.view().table.selected_count, 0);

    // Stale key: no-op.
    page.delete_player(first.key);
    assert_eq!(page.roster().len(), 1);
}

#[test]
fn deleting_last_row_of_last_page_moves_back_a_page() {
    let (mut page, _) = page_of(&numbered(3), 2);
    page.next_page();
    let last = page.view().table.rows[0].key;
    page.delete_player(last);
    let view = page.view().table;
    assert_eq!(view.page_index, 0);
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn form_submit_adds_and_clears() {
    let (mut page, _) = page_of(&[], 10);
    page.set_form_field(InputField::Name, "Bob");
    page.set_form_field(InputField::Id, "7");
    page.set_form_field(InputField::VipSlots, "3");
    page.set_form_field(InputField::MatchSlots, "0");
    page.submit_form();

    assert_eq!(page.roster().players(), vec![Player::new("Bob", Some(7), 3, 0)]);
    assert_eq!(page.form().input(), &PlayerInput::default());
}

#[test]
fn invalid_form_submit_keeps_values() {
    let (mut page, storage) = page_of(&[], 10);
    page.set_form_field(InputField::Name, "Bob");
    page.set_form_field(InputField::VipSlots, "3");
    page.submit_form();

    assert!(page.roster().is_empty());
    assert_eq!(page.form().input(), &PlayerInput::new("Bob", "", "3", ""));
    assert_eq!(storage.load(), Some(vec![]));
}

#[test]
fn rows_render_id_placeholder_and_summary() {
    let store = store_of(&[Player::new("Alice", None, 2, 1)]);
    let row = TableState::default().view(&store).rows.remove(0);
    assert_eq!(row.id_display, "-");
    assert_eq!(row.summary, "Alice - ID: No ID - Slot VIP: 2 - Slot Match: 1");
}
