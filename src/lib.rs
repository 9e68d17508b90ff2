pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod source;
pub mod state;

pub use error::{SearchError, StoreError};
pub use models::{Page, Pagination, Record};
