use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    pub github_token: Option<String>,
    /// Login substituted for `@me` in filter values.
    pub viewer: Option<String>,
    pub theme: Option<String>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub description: Option<String>,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn display_name(&self) -> String {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => {
                format!("{} ({})", self.full_name(), description)
            }
            _ => self.full_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            viewer: None,
            theme: None,
            repositories: vec![Repository {
                owner: "Azure".to_string(),
                name: "AKS".to_string(),
                labels: vec!["networking".to_string()],
                description: Some("Azure Kubernetes Service".to_string()),
            }],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            config.github_token = Some(token);
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Source keys in configured order.
    pub fn source_keys(&self) -> Vec<String> {
        self.repositories
            .iter()
            .map(Repository::full_name)
            .collect()
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("issue-monitor").join("config.toml")
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config");
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::{Config, Repository};

    #[test]
    fn parses_repositories_and_viewer() {
        let input = r#"
            viewer = "octocat"

            [[repositories]]
            owner = "acme"
            name = "widgets"
            labels = ["bug"]

            [[repositories]]
            owner = "acme"
            name = "gadgets"
            description = "Gadget service"
        "#;

        let config: Config = toml::from_str(input).expect("parse config");
        assert_eq!(config.viewer.as_deref(), Some("octocat"));
        assert_eq!(
            config.source_keys(),
            vec!["acme/widgets".to_string(), "acme/gadgets".to_string()]
        );
        assert_eq!(config.repositories[0].labels, vec!["bug".to_string()]);
        assert!(config.repositories[1].labels.is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_default_repository() {
        let path = std::env::temp_dir().join("issue-monitor-missing-config.toml");
        let config = Config::load_from(&path).expect("load default");
        assert_eq!(config.source_keys(), vec!["Azure/AKS".to_string()]);
    }

    #[test]
    fn display_name_includes_description() {
        let repository = Repository {
            owner: "acme".to_string(),
            name: "gadgets".to_string(),
            labels: Vec::new(),
            description: Some("Gadget service".to_string()),
        };
        assert_eq!(repository.display_name(), "acme/gadgets (Gadget service)");
    }
}
