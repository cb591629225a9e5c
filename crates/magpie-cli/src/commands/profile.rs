//! Browser profile management commands.
//!
//! Persistent profiles keep Chrome state (cookies, site settings) between
//! scrape runs under `~/.magpie/profiles`. They can be listed, inspected,
//! deleted, or have their cache cleared.

use anyhow::{Result, anyhow};
use magpie_browser::UserDataDir;
use std::fs;
use std::io::{self, Write};

const SIZE_WARNING_THRESHOLD: u64 = 1_073_741_824; // 1GB

/// List all available profiles
pub fn list() -> Result<()> {
    let profiles_root = UserDataDir::profiles_root()?;

    if !profiles_root.exists() {
        println!(
            "No profiles found. Profiles will be created in: {}",
            profiles_root.display()
        );
        return Ok(());
    }

    let mut profiles = Vec::new();

    for entry in fs::read_dir(&profiles_root)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("Invalid profile name"))?
                .to_string();

            let user_data = UserDataDir::persistent(path.clone())?;
            let size = user_data.size().unwrap_or(0);

            profiles.push((name, path, size));
        }
    }

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    profiles.sort_by(|a, b| a.0.cmp(&b.0));

    println!("Available profiles:");
    println!();

    let mut has_warnings = false;

    for (name, path, size) in profiles {
        let size_mb = size as f64 / 1_048_576.0;

        let warning = if size > SIZE_WARNING_THRESHOLD {
            has_warnings = true;
            " ⚠️  Large"
        } else {
            ""
        };

        println!("  {:<20} {:>8.1} MB    {}{}", name, size_mb, path.display(), warning);
    }

    if has_warnings {
        println!();
        println!(
            "⚠️  Some profiles exceed 1GB. Consider using 'magpie profile clean' to reclaim space."
        );
    }

    Ok(())
}

/// Show detailed information about a profile
pub fn info(name: &str) -> Result<()> {
    let profile_path = UserDataDir::profiles_root()?.join(name);

    if !profile_path.exists() {
        return Err(anyhow!("Profile '{}' not found", name));
    }

    let user_data = UserDataDir::persistent(profile_path.clone())?;
    let size = user_data.size()?;
    let size_mb = size as f64 / 1_048_576.0;

    let has_cookies = profile_path.join("Cookies").exists();

    println!("Profile: {}", name);
    println!("Path: {}", profile_path.display());
    println!("Size: {:.1} MB ({} bytes)", size_mb, size);
    println!("Cookies: {}", if has_cookies { "Yes" } else { "No" });

    Ok(())
}

/// Delete a profile
pub fn delete(name: &str, force: bool) -> Result<()> {
    let profile_path = UserDataDir::profiles_root()?.join(name);

    if !profile_path.exists() {
        return Err(anyhow!("Profile '{}' not found", name));
    }

    // Require confirmation
    if !force {
        print!(
            "⚠️  This will permanently delete profile '{}' and all its data.\nType '{}' to confirm: ",
            name, name
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != name {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    fs::remove_dir_all(&profile_path)?;
    println!("✅ Profile '{}' deleted", name);

    Ok(())
}

/// Clear cache from profiles
pub fn clean(profile_name: Option<&str>) -> Result<()> {
    let profiles_root = UserDataDir::profiles_root()?;

    if !profiles_root.exists() {
        println!("No profiles found.");
        return Ok(());
    }

    if let Some(name) = profile_name {
        let profile_path = profiles_root.join(name);

        if !profile_path.exists() {
            return Err(anyhow!("Profile '{}' not found", name));
        }

        let user_data = UserDataDir::persistent(profile_path)?;
        user_data.clear_cache()?;
        println!("✅ Cache cleared for profile '{}'", name);
    } else {
        let mut cleaned = 0;

        for entry in fs::read_dir(&profiles_root)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| anyhow!("Invalid profile name"))?
                    .to_string();

                let user_data = UserDataDir::persistent(path)?;
                user_data.clear_cache()?;
                cleaned += 1;
                println!("  Cleaned: {}", name);
            }
        }

        println!("✅ Cache cleared from {} profile(s)", cleaned);
    }

    Ok(())
}
