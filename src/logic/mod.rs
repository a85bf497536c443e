//! Presentation logic: table view derivation, creation form, and the page that ties them to
//! the roster store.

mod form;
mod page;
mod table;

pub use form::CreationForm;
pub use page::{PageView, RosterPage, NOTICES};
pub use table::{
    CheckState, Column, ColumnView, RowView, SortDirection, Sorting, TableState, TableView,
    DEFAULT_PAGE_SIZE, EMPTY_MESSAGE,
};
