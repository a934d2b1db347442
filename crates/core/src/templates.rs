//! Application template catalog
//!
//! A template is a directory under the projects root carrying an `info.json`
//! descriptor and a director composition file, plus an optional environment
//! file and any number of named extra config files. Descriptors may contain
//! comments (the original tooling wrote them that way), so they are parsed
//! as JSON5. Directories missing a required file or carrying a malformed
//! descriptor are skipped with a warning; enumeration never aborts.

use crate::errors::{Result, TemplateError};
use crate::settings::{DIRECTOR_FILE, ENV_FILE, INFO_FILE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// One entry of the descriptor's `extra-files` map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraFile {
    /// File name inside the template directory; defaults to the logical name
    #[serde(default)]
    pub filename: Option<String>,

    /// Syntax hint for display/editing (e.g. "yaml", "ini")
    #[serde(default)]
    pub lang: Option<String>,
}

/// Template descriptor structure representing `info.json`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Display name override; defaults to the directory name
    #[serde(default)]
    pub name: Option<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Icon path relative to the template directory
    #[serde(default)]
    pub image: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub www: Option<String>,

    /// Logical name -> extra config file, in descriptor order
    #[serde(default, rename = "extra-files")]
    pub extra_files: IndexMap<String, ExtraFile>,
}

/// A cataloged template: descriptor plus its on-disk location
#[derive(Debug, Clone)]
pub struct Template {
    /// Display name (descriptor override or directory name)
    pub name: String,
    /// Template directory
    pub dir: PathBuf,
    /// Parsed descriptor
    pub info: TemplateInfo,
}

/// Editable content of one extra file
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraFileContent {
    /// File name inside the template/workspace directory
    pub filename: String,
    /// Syntax hint carried from the descriptor
    pub lang: Option<String>,
    /// Current file content
    pub content: String,
}

/// Editable file contents of a template, loaded for presentation or staging
#[derive(Debug, Clone)]
pub struct TemplateFiles {
    /// Director composition file content
    pub director: String,
    /// Environment file content, when the template ships one
    pub env: Option<String>,
    /// Logical name -> extra file content, in descriptor order
    pub extras: IndexMap<String, ExtraFileContent>,
}

/// Parse a template descriptor file (JSON with comments allowed)
pub fn parse_template_info(path: &Path) -> Result<TemplateInfo> {
    let content = fs::read_to_string(path).map_err(TemplateError::Io)?;
    let info: TemplateInfo = json5::from_str(&content).map_err(|e| TemplateError::Parsing {
        message: e.to_string(),
    })?;
    Ok(info)
}

/// Enumerate templates under the projects root
///
/// Returns templates sorted by display name. A missing projects root yields
/// an empty catalog.
#[instrument(level = "debug")]
pub fn catalog(projects_dir: &Path) -> Result<Vec<Template>> {
    let mut templates = Vec::new();

    if !projects_dir.is_dir() {
        debug!("Projects root {} does not exist", projects_dir.display());
        return Ok(templates);
    }

    for entry in fs::read_dir(projects_dir)? {
        let entry = entry?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let info_file = dir.join(INFO_FILE);
        let director_file = dir.join(DIRECTOR_FILE);

        if !info_file.is_file() {
            warn!(
                "{}: The template doesn't have an information file",
                dir.display()
            );
            continue;
        }
        if !director_file.is_file() {
            warn!(
                "{}: The template doesn't have a director file",
                dir.display()
            );
            continue;
        }

        let info = match parse_template_info(&info_file) {
            Ok(info) => info,
            Err(e) => {
                warn!("{}: Skipping malformed descriptor: {}", dir.display(), e);
                continue;
            }
        };

        let dir_name = entry.file_name().to_string_lossy().into_owned();
        let name = info.name.clone().unwrap_or(dir_name);

        templates.push(Template { name, dir, info });
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));

    debug!("Cataloged {} templates", templates.len());

    Ok(templates)
}

/// Find a single template by display name or directory name
pub fn find(projects_dir: &Path, name: &str) -> Result<Template> {
    catalog(projects_dir)?
        .into_iter()
        .find(|t| t.name == name || t.dir.file_name().is_some_and(|d| d == name))
        .ok_or_else(|| {
            TemplateError::NotFound {
                path: projects_dir.join(name).display().to_string(),
            }
            .into()
        })
}

/// Load a template's editable file contents
#[instrument(level = "debug", skip(template), fields(template = %template.name))]
pub fn load_files(template: &Template) -> Result<TemplateFiles> {
    let director =
        fs::read_to_string(template.dir.join(DIRECTOR_FILE)).map_err(TemplateError::Io)?;

    let env_path = template.dir.join(ENV_FILE);
    let env = if env_path.is_file() {
        Some(fs::read_to_string(&env_path).map_err(TemplateError::Io)?)
    } else {
        None
    };

    let mut extras = IndexMap::new();
    for (logical_name, extra) in &template.info.extra_files {
        let filename = extra.filename.clone().unwrap_or_else(|| logical_name.clone());
        let content =
            fs::read_to_string(template.dir.join(&filename)).map_err(TemplateError::Io)?;
        extras.insert(
            logical_name.clone(),
            ExtraFileContent {
                filename,
                lang: extra.lang.clone(),
                content,
            },
        );
    }

    Ok(TemplateFiles {
        director,
        env,
        extras,
    })
}
