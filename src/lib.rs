//! Player roster manager: library with the roster store, storage backends, table
//! presentation logic and the HTTP surface.

pub mod api;
pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    CheckState, Column, ColumnView, CreationForm, PageView, RosterPage, RowView, SortDirection,
    Sorting, TableState, TableView, DEFAULT_PAGE_SIZE, EMPTY_MESSAGE, NOTICES,
};
pub use models::{
    Counter, InputField, Player, PlayerInput, PlayerKey, RosterEntry, RosterError, RosterStore,
};
pub use storage::{FileStorage, MemoryStorage, RosterStorage, StorageError, STORAGE_KEY};
