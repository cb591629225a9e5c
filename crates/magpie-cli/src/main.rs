use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use magpie_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "magpie")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for scraping social profile pages with headless Chrome",
    long_about = "Magpie loads a profile page in a headless Chrome, waits for it to render, \
                  and extracts the profile fields (name, handle, bio, category, website, \
                  join date, follower and following counts) into a single printed record."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a profile page and print the extracted record
    Scrape {
        /// Profile URL to scrape
        #[arg(value_name = "URL", default_value = commands::scrape::DEFAULT_TARGET_URL)]
        url: String,

        /// Seconds to wait for the page to render after navigation
        #[arg(long, default_value_t = 2)]
        wait: u64,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Named persistent browser profile to reuse
        #[arg(long)]
        profile: Option<String>,

        /// Force a temporary browser profile
        #[arg(long)]
        temp: bool,

        /// Run Chrome with a visible window instead of headless
        #[arg(long)]
        headful: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Manage persistent browser profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List all browser profiles
    List,

    /// Show detailed information about a profile
    Info {
        /// Profile name
        name: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Clear cache from profiles
    Clean {
        /// Profile name (all profiles when omitted)
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Scrape {
            url,
            wait,
            chrome_path,
            profile,
            temp,
            headful,
            format,
        } => commands::scrape::execute(&url, wait, chrome_path, profile, temp, headful, format),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Info { name } => commands::profile::info(&name),
            ProfileAction::Delete { name, force } => commands::profile::delete(&name, force),
            ProfileAction::Clean { name } => commands::profile::clean(name.as_deref()),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("magpie=debug,magpie_core=debug,magpie_browser=debug")
    } else {
        EnvFilter::new("magpie=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
