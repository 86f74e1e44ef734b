use crate::{
    browser::config::LaunchOptions,
    error::{FlowError, Result},
};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// A single browser session: one Chrome instance, one page.
///
/// The session is created closed and opens lazily on first use. Subsequent
/// operations reuse the same page until [`Session::close`] tears the browser
/// down and resets the session to its initial state. The session is
/// exclusively owned by whichever flow is currently running against it;
/// callers that share one across tasks must serialize access themselves.
pub struct Session {
    options: LaunchOptions,
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl Session {
    /// Create a closed session; no browser is launched until first use
    pub fn new(options: LaunchOptions) -> Self {
        Self { options, browser: None, tab: None }
    }

    /// Whether a browser is currently open
    pub fn is_open(&self) -> bool {
        self.tab.is_some()
    }

    /// Change the headless flag for the next launch. No effect while open.
    pub fn set_headless(&mut self, headless: bool) {
        if !self.is_open() {
            self.options.headless = headless;
        }
    }

    /// Open the browser if it is not already open and return the page
    pub fn open(&mut self) -> Result<&Arc<Tab>> {
        if self.tab.is_none() {
            let mut launch_opts = headless_chrome::LaunchOptions::default();

            // Ignore default arguments to prevent detection by anti-bot services
            launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
            launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

            // Raise the idle timeout (default 30s) so the browser survives between operations
            launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

            launch_opts.headless = self.options.headless;
            launch_opts.window_size = Some((self.options.window_width, self.options.window_height));
            launch_opts.sandbox = self.options.sandbox;

            if let Some(path) = &self.options.chrome_path {
                launch_opts.path = Some(path.clone());
            }

            if let Some(dir) = &self.options.user_data_dir {
                launch_opts.user_data_dir = Some(dir.clone());
            }

            let browser = Browser::new(launch_opts).map_err(|e| FlowError::LaunchFailed(e.to_string()))?;
            let tab = browser
                .new_tab()
                .map_err(|e| FlowError::LaunchFailed(format!("failed to create tab: {}", e)))?;

            log::debug!("browser launched (headless: {})", self.options.headless);

            self.browser = Some(browser);
            self.tab = Some(tab);
        }

        self.page()
    }

    /// Get the active page, failing if the session is closed
    pub fn page(&self) -> Result<&Arc<Tab>> {
        self.tab.as_ref().ok_or(FlowError::NoActivePage)
    }

    /// Navigate the page to a URL, opening the browser first if needed
    pub fn navigate(&mut self, url: &str) -> Result<()> {
        let tab = self.open()?;

        tab.navigate_to(url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| FlowError::NavigationFailed { url: url.to_string(), reason: e.to_string() })?;

        Ok(())
    }

    /// Close the browser and reset the session to its initial, closed state
    pub fn close(&mut self) -> Result<()> {
        if let Some(tab) = self.tab.take() {
            let _ = tab.close(false);
        }
        if self.browser.take().is_some() {
            log::debug!("browser closed");
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
