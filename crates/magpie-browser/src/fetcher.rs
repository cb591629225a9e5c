use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;

/// Default render wait after navigation.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(2);

/// Fetches the rendered source of a single page with a headless Chrome.
///
/// One fetch owns one browser process: launch, navigate, wait a fixed delay
/// for client-side rendering, read the page source, close. The browser is
/// gone before the caller ever parses the HTML.
pub struct PageFetcher {
    chrome_path: PathBuf,
    user_data_dir: PathBuf,
    wait: Duration,
    headless: bool,
}

impl PageFetcher {
    pub fn new(chrome_path: PathBuf, user_data_dir: PathBuf) -> Self {
        Self {
            chrome_path,
            user_data_dir,
            wait: DEFAULT_WAIT,
            headless: true,
        }
    }

    /// Override the fixed render wait.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Run Chrome with a visible window instead of headless.
    pub fn with_head(mut self) -> Self {
        self.headless = false;
        self
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.chrome_path)
            .user_data_dir(&self.user_data_dir);

        if !self.headless {
            builder = builder.with_head();
        }

        builder.build().map_err(Error::Browser)
    }

    /// Load `url` and return the rendered page source.
    ///
    /// Launch and navigation failures propagate; there is no retry. The
    /// browser process is torn down before this returns.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let target = normalize_url(url);

        tracing::info!("Launching Chrome from {}", self.chrome_path.display());
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?).await?;

        // The handler stream must be drained for any browser command to
        // make progress. It ends when the browser closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        tracing::info!("Navigating to {}", target);
        let page = browser.new_page(target.as_str()).await?;

        tracing::debug!("Waiting {:?} for the page to render", self.wait);
        tokio::time::sleep(self.wait).await;

        let html = page.content().await?;
        tracing::info!("Captured {} bytes of page source", html.len());

        browser.close().await?;
        let _ = handler_task.await;

        Ok(html)
    }
}

/// Prepend an https scheme when the target has none.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
