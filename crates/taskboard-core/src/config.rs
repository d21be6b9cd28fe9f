use crate::derive::{Grouping, ListFilter, StatusFilter, ViewConfig, ViewMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "http://localhost:5001";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub view: ViewDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Defaults for `tb view` when flags are not given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewDefaults {
    #[serde(default)]
    pub mode: Option<ViewMode>,
    #[serde(default)]
    pub grouping: Option<Grouping>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
}

impl ViewDefaults {
    /// Build a [`ViewConfig`], letting explicit overrides win field by field.
    #[must_use]
    pub fn resolve(
        &self,
        mode: Option<ViewMode>,
        grouping: Option<Grouping>,
        status: Option<&str>,
        categories: &[i64],
    ) -> ViewConfig {
        let status = status
            .or(self.status.as_deref())
            .map_or(StatusFilter::All, |s| {
                s.parse().unwrap_or(StatusFilter::All)
            });
        let category_ids = if categories.is_empty() {
            self.categories.clone()
        } else {
            categories.to_vec()
        };

        ViewConfig {
            mode: mode.or(self.mode).unwrap_or_default(),
            grouping: grouping.or(self.grouping).unwrap_or_default(),
            filter: ListFilter::new(status, category_ids),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub api: ApiConfig,
    pub resolved_output: String,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".taskboard/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("taskboard/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(
    project_root: &Path,
    cli_json: bool,
    cli_api: Option<&str>,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format)?;

    let env_api = env::var("TASKBOARD_API_BASE").ok();
    let api = resolve_api(
        cli_api,
        env_api.as_deref(),
        project.api.as_ref(),
        user.api.as_ref(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        api,
        resolved_output,
    })
}

/// Flag > env > project file > user file > defaults.
fn resolve_api(
    cli_api: Option<&str>,
    env_api: Option<&str>,
    project: Option<&ApiConfig>,
    user: Option<&ApiConfig>,
) -> ApiConfig {
    let mut api = project.or(user).cloned().unwrap_or_default();
    if let Some(base) = cli_api.or(env_api).filter(|s| !s.trim().is_empty()) {
        api.base_url = base.trim().to_string();
    }
    api.base_url = api.base_url.trim_end_matches('/').to_string();
    api
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
) -> Result<String> {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some("pretty"),
            "text" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return Ok("json".to_string());
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return Ok(mode.to_string());
    }

    if std::io::stdout().is_terminal() {
        Ok("pretty".to_string())
    } else {
        Ok("text".to_string())
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}
