//! Reading and writing org chart literals (JSON or TOML).

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Employee;

/// Serialization format of an org chart literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrgFormat {
    Json,
    Toml,
}

impl OrgFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ApplicationError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parses an org chart literal from `content`.
pub fn parse_org(content: &str, format: OrgFormat, path: &Path) -> ApplicationResult<Employee> {
    let parsed: Result<Employee, String> = match format {
        OrgFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        OrgFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ApplicationError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Loads the org chart rooted at the CEO from a `.json` or `.toml` file.
#[instrument(level = "debug")]
pub fn load_org(path: &Path) -> ApplicationResult<Employee> {
    let format = OrgFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).with_path_context("read org chart", path)?;
    let ceo = parse_org(&content, format, path)?;
    debug!(employees = ceo.headcount(), "loaded org chart");
    Ok(ceo)
}

/// Renders an org chart literal in the given format.
pub fn render_org(ceo: &Employee, format: OrgFormat) -> ApplicationResult<String> {
    let rendered = match format {
        OrgFormat::Json => serde_json::to_string_pretty(ceo).map_err(|e| e.to_string()),
        OrgFormat::Toml => toml::to_string_pretty(ceo).map_err(|e| e.to_string()),
    };
    rendered.map_err(|message| ApplicationError::Render { message })
}
