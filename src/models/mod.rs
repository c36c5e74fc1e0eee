pub mod collection;
pub mod record;
pub mod suggestion;

pub use collection::*;
pub use record::*;
pub use suggestion::*;
