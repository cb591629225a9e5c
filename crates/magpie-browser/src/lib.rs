mod chrome_finder;
mod error;
mod fetcher;
mod user_data;

pub use chrome_finder::find_chrome;
pub use error::{Error, Result};
pub use fetcher::{PageFetcher, normalize_url};
pub use user_data::UserDataDir;
