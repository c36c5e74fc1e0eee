pub mod filters;
pub mod health;
pub mod records;
pub mod search;
pub mod suggestions;
