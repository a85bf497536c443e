//! The roster page: roster store, table state and creation form behind one set of user
//! actions. Rejected actions are silent no-ops; the reason only goes to the debug log.

use crate::logic::form::CreationForm;
use crate::logic::table::{Column, TableState, TableView};
use crate::models::{Counter, InputField, PlayerInput, PlayerKey, RosterError, RosterStore};
use crate::storage::RosterStorage;
use serde::Serialize;

/// Static warnings shown under the table.
pub const NOTICES: [&str; 2] = [
    "Clearing your local data, history, cache and cookies will erase every player you have saved.",
    "*Data is stored locally on this device only.",
];

/// Full render state: table, current form values, notices.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub table: TableView,
    pub form: PlayerInput,
    pub notices: [&'static str; 2],
}

pub struct RosterPage {
    roster: RosterStore,
    table: TableState,
    form: CreationForm,
}

impl RosterPage {
    /// Load the roster from `storage` with an empty table state.
    pub fn load(storage: Box<dyn RosterStorage>, page_size: usize) -> Self {
        Self {
            roster: RosterStore::load(storage),
            table: TableState::new(page_size),
            form: CreationForm::new(),
        }
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    pub fn view(&self) -> PageView {
        PageView {
            table: self.table.view(&self.roster),
            form: self.form.input().clone(),
            notices: NOTICES,
        }
    }

    /// Add a player directly, bypassing the form's typed values.
    pub fn add_player(&mut self, input: &PlayerInput) {
        let result = self.roster.add(input).map(drop);
        self.after(result, "add player");
    }

    pub fn set_form_field(&mut self, field: InputField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn submit_form(&mut self) {
        let result = self.form.submit(&mut self.roster).map(drop);
        self.after(result, "submit form");
    }

    pub fn delete_player(&mut self, key: PlayerKey) {
        let result = self.roster.remove_by_key(key).map(drop);
        self.after(result, "delete player");
    }

    pub fn adjust_counter(&mut self, key: PlayerKey, counter: Counter, delta: i64) {
        let result = self.roster.adjust_counter_by_key(key, counter, delta).map(drop);
        self.after(result, "adjust counter");
    }

    /// "Copy info" text for a row.
    pub fn summary(&self, key: PlayerKey) -> Option<String> {
        self.roster.get(key).map(|p| p.summary())
    }

    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.table.set_filter(value);
    }

    pub fn toggle_sort(&mut self, column: Column) {
        if !self.table.toggle_sort(column) {
            log::debug!("Column {} is not sortable", column.id());
        }
    }

    pub fn set_column_visible(&mut self, column: Column, visible: bool) {
        if !self.table.set_column_visible(column, visible) {
            log::debug!("Column {} cannot be hidden", column.id());
        }
    }

    pub fn set_row_selected(&mut self, key: PlayerKey, selected: bool) {
        if self.roster.position_of(key).is_some() {
            self.table.set_row_selected(key, selected);
        } else {
            log::debug!("Ignoring selection of unknown row {}", key);
        }
    }

    pub fn set_page_selected(&mut self, selected: bool) {
        self.table.set_page_selected(&self.roster, selected);
    }

    pub fn next_page(&mut self) {
        self.table.next_page(&self.roster);
    }

    pub fn previous_page(&mut self) {
        self.table.previous_page();
    }

    fn after(&mut self, result: Result<(), RosterError>, action: &str) {
        match result {
            Ok(()) => self.table.sync_with(&self.roster),
            Err(e) => log::debug!("Ignored {}: {}", action, e),
        }
    }
}
