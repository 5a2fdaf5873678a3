use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "contribviz")]
#[command(about = "Render contributor statistics snapshots into PNG images")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Directory containing contributors-*.json files (default: current dir)")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory the PNG images are written to (default: images)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the HTML templates (default: templates)")]
    pub templates_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Repository name used when the data file has none")]
    pub repository: Option<String>,

    #[arg(long, global = true, value_parser = humantime::parse_duration, help = "Delay before capturing a rendered page, e.g. 2s or 500ms")]
    pub settle: Option<Duration>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill the HTML templates and rasterize them with headless Chrome
    Html,
    /// Draw bar charts directly
    Charts,
    /// Print the ranked aggregate without rendering images
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = crate::config::VizConfig::from(&self.common);
        match self.command {
            Commands::Html => crate::pipeline::exec_render(&config, crate::render::RendererKind::Browser),
            Commands::Charts => crate::pipeline::exec_render(&config, crate::render::RendererKind::Chart),
            Commands::Summary { json } => crate::pipeline::exec_summary(&config, json),
        }
    }
}
