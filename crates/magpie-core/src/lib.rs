pub mod error;
pub mod extract;
pub mod record;

pub use error::{Error, Result};
pub use extract::extract_profile;
pub use record::ProfileRecord;
