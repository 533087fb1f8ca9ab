pub mod types;
pub mod status;
pub mod queries;
pub mod filter;

pub use types::*;
pub use status::*;
pub use queries::*;
