use crate::OutputFormat;
use anyhow::{Context, Result};
use magpie_browser::{PageFetcher, UserDataDir, find_chrome, normalize_url};
use magpie_core::record::{ProfileRecord, to_json};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// The profile page scraped when no URL is given.
pub const DEFAULT_TARGET_URL: &str = "https://twitter.com/Sanatan_dive";

pub fn execute(
    url: &str,
    wait_secs: u64,
    chrome_path: Option<PathBuf>,
    profile: Option<String>,
    temp: bool,
    headful: bool,
    format: OutputFormat,
) -> Result<()> {
    // Validate the target before touching the browser.
    let target = normalize_url(url);
    Url::parse(&target).with_context(|| format!("Invalid target URL: {}", url))?;
    tracing::debug!(target = %target, format = format.as_str(), "starting scrape");

    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        // Step 1: Find Chrome binary
        println!("🔍 Locating Chrome...");
        let chrome_binary = find_chrome(chrome_path.as_deref())?;
        println!("✅ Found Chrome at: {}", chrome_binary.display());

        // Step 2: Pick a user-data directory
        if profile.is_some() && temp {
            println!("⚠️  Both --profile and --temp given; --temp wins");
        }

        let user_data = match profile.filter(|_| !temp) {
            Some(name) => {
                let path = UserDataDir::profiles_root()?.join(&name);
                println!("📁 Using profile: {}", path.display());
                UserDataDir::persistent(path)?
            }
            None => {
                println!("📁 Using temporary profile");
                UserDataDir::temporary()?
            }
        };

        // Step 3: Fetch the rendered page
        let mut fetcher =
            PageFetcher::new(chrome_binary, user_data.path().to_path_buf())
                .with_wait(Duration::from_secs(wait_secs));
        if headful {
            fetcher = fetcher.with_head();
        }

        println!("🚀 Launching Chrome...");
        println!("📍 Loading: {}", target);
        let html = fetcher.fetch(&target).await?;
        println!("📄 Rendered {} bytes of page source", html.len());

        // Step 4: Extract the profile fields
        let record = magpie_core::extract_profile(&html);
        let missing = record.missing_fields();

        // Step 5: Print the single-record list
        let records = vec![record];
        match format {
            OutputFormat::Json => println!("{}", to_json(&records)?),
            OutputFormat::Pretty => print_pretty(&records),
        }

        if !missing.is_empty() {
            println!();
            println!("⚠️  {} field(s) absent: {}", missing.len(), missing.join(", "));
        }

        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

fn print_pretty(records: &[ProfileRecord]) {
    for record in records {
        println!();
        println!("Profile:");
        print_field("Name", &record.name);
        print_field("Handle", &record.handle);
        print_field("Bio", &record.bio);
        print_field("Category", &record.category);
        print_field("Website", &record.website);
        print_field("Joined", &record.joining_date);
        print_field("Following", &record.following);
        print_field("Followers", &record.followers);
    }
}

fn print_field(label: &str, value: &Option<String>) {
    match value {
        Some(value) => println!("  {:<10} {}", label, value),
        None => println!("  {:<10} -", label),
    }
}
