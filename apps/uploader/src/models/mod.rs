pub mod parse_result;
pub mod upload;

pub use parse_result::ParseResult;
pub use upload::{ExtractOptions, SelectedFile};
