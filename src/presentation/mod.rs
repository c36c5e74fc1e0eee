pub mod code;
pub mod view;

pub use code::{load_source_code, vulnerability_extension, CodeDetails, CodeView, FILE_NOT_FOUND_MESSAGE};
pub use view::RecordView;
