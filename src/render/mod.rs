//! Rendering backends turning a [`RunAggregate`] into PNG files.

pub mod chart;
#[cfg(feature = "browser")]
pub mod html;
pub mod template;

use crate::config::VizConfig;
use crate::error::Result;
use crate::model::RunAggregate;
use std::path::{Path, PathBuf};

pub use chart::ChartRenderer;
#[cfg(feature = "browser")]
pub use html::BrowserRenderer;

/// Number of contributors shown in the top contributors image.
pub const TOP_CONTRIBUTORS: usize = 3;

pub const OVERVIEW_WIDTH: u32 = 600;
pub const OVERVIEW_HEIGHT: u32 = 655;
pub const RANKING_WIDTH: u32 = 800;
pub const RANKING_BASE_HEIGHT: u32 = 360;
pub const RANKING_ROW_HEIGHT: u32 = 45;

/// Height of the complete ranking page for `contributors` table rows.
pub fn ranking_height(contributors: usize) -> u32 {
    let rows = u32::try_from(contributors).unwrap_or(u32::MAX);
    RANKING_BASE_HEIGHT.saturating_add(rows.saturating_mul(RANKING_ROW_HEIGHT))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    TopContributors,
    CompleteRanking,
}

impl Artifact {
    pub const ALL: [Artifact; 2] = [Artifact::TopContributors, Artifact::CompleteRanking];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::TopContributors => "top3-contributors.png",
            Artifact::CompleteRanking => "complete-ranking.png",
        }
    }

    pub fn path_in(self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Browser,
    Chart,
}

pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Render a single artifact to `path`.
    fn render_artifact(&self, artifact: Artifact, aggregate: &RunAggregate, path: &Path) -> Result<()>;
}

pub fn renderer_for(kind: RendererKind, config: &VizConfig) -> Result<Box<dyn Renderer>> {
    match kind {
        RendererKind::Chart => Ok(Box::new(ChartRenderer::new())),
        #[cfg(feature = "browser")]
        RendererKind::Browser => Ok(Box::new(BrowserRenderer::new(&config.templates_dir, config.settle))),
        #[cfg(not(feature = "browser"))]
        RendererKind::Browser => {
            let _ = config;
            Err(crate::error::VizError::render(
                "built without the `browser` feature; HTML rendering is unavailable",
            ))
        }
    }
}
