pub mod connection;
pub mod records;
pub mod schema;
pub mod store;
pub mod suggestions;

pub use connection::Database;
pub use store::{RecordStore, SuggestionStore};
