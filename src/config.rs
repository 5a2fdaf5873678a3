use crate::cli::CommonArgs;
use std::path::PathBuf;
use std::time::Duration;

/// Repository name used when a snapshot does not carry one.
pub const DEFAULT_REPOSITORY: &str = "aquario-ufpb/aquario";
pub const DEFAULT_OUTPUT_DIR: &str = "images";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct VizConfig {
    /// Directory searched for `contributors-*.json`. `None` means the
    /// current working directory.
    pub data_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub default_repository: String,
    pub settle: Duration,
}

impl VizConfig {
    pub fn data_dir(&self) -> std::io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            default_repository: DEFAULT_REPOSITORY.to_string(),
            settle: DEFAULT_SETTLE,
        }
    }
}

impl From<&CommonArgs> for VizConfig {
    fn from(args: &CommonArgs) -> Self {
        let defaults = VizConfig::default();
        Self {
            data_dir: args.data_dir.clone(),
            output_dir: args.output_dir.clone().unwrap_or(defaults.output_dir),
            templates_dir: args.templates_dir.clone().unwrap_or(defaults.templates_dir),
            default_repository: args.repository.clone().unwrap_or(defaults.default_repository),
            settle: args.settle.unwrap_or(defaults.settle),
        }
    }
}
