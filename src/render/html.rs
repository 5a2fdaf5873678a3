//! HTML templates rasterized with headless Chrome (via `headless_chrome`).

use super::template::{load_template, render_page};
use super::{ranking_height, Artifact, Renderer, OVERVIEW_HEIGHT, OVERVIEW_WIDTH, RANKING_WIDTH};
use crate::error::{Result, VizError};
use crate::model::RunAggregate;
use base64::Engine as _;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEVICE_SCALE_FACTOR: f64 = 2.0;

const CHROME_ARGS: [&str; 5] = [
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
];

pub struct BrowserRenderer {
    templates_dir: PathBuf,
    settle: Duration,
}

impl BrowserRenderer {
    pub fn new(templates_dir: &Path, settle: Duration) -> Self {
        Self {
            templates_dir: templates_dir.to_path_buf(),
            settle,
        }
    }

    fn viewport(artifact: Artifact, aggregate: &RunAggregate) -> (u32, u32) {
        match artifact {
            Artifact::TopContributors => (OVERVIEW_WIDTH, OVERVIEW_HEIGHT),
            Artifact::CompleteRanking => (RANKING_WIDTH, ranking_height(aggregate.contributors.len())),
        }
    }
}

impl Renderer for BrowserRenderer {
    fn name(&self) -> &'static str {
        "headless browser"
    }

    fn render_artifact(&self, artifact: Artifact, aggregate: &RunAggregate, path: &Path) -> Result<()> {
        let template = load_template(&self.templates_dir, artifact)?;
        let html = render_page(artifact, aggregate, &template);
        let (width, height) = Self::viewport(artifact, aggregate);

        let session = BrowserSession::launch(width, height)?;
        let png = session.capture(&html, width, height, self.settle)?;
        drop(session);

        std::fs::write(path, png)?;
        Ok(())
    }
}

/// One browser process with one tab. Dropping the session closes the tab and
/// kills the browser, on success and error paths alike.
struct BrowserSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession {
    fn launch(width: u32, height: u32) -> Result<Self> {
        let args: Vec<&OsStr> = CHROME_ARGS.iter().map(|a| OsStr::new(*a)).collect();
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((width, height)))
            .args(args)
            .build()
            .map_err(|e| VizError::render(format!("Failed to build launch options: {}", e)))?;

        let browser =
            Browser::new(options).map_err(|e| VizError::render(format!("Failed to launch browser: {}", e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| VizError::render(format!("Failed to create tab: {}", e)))?;

        Ok(Self { tab, _browser: browser })
    }

    fn capture(&self, html: &str, width: u32, height: u32, settle: Duration) -> Result<Vec<u8>> {
        let url = format!(
            "data:text/html;charset=utf-8;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(html)
        );
        self.tab
            .navigate_to(&url)
            .map_err(|e| VizError::render(format!("Navigation failed: {}", e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| VizError::render(format!("Wait for navigation failed: {}", e)))?;

        // web fonts and images load asynchronously
        std::thread::sleep(settle);

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(width),
            height: f64::from(height),
            scale: DEVICE_SCALE_FACTOR,
        };
        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| VizError::render(format!("Screenshot failed: {}", e)))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.tab.close(false);
    }
}
