pub mod profile;
pub mod scrape;
