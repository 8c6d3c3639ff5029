//! Configuration module
//!
//! Settings shared by every command, taken from global flags or the
//! environment.

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project name, prefixed to the pipeline name to form SCM source ids
    pub project: String,

    /// Emit JSON without pretty printing
    pub compact_json: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project.chars().any(char::is_whitespace) {
            anyhow::bail!("project cannot contain whitespace");
        }

        if self.project.contains('/') {
            anyhow::bail!("project cannot contain `/`");
        }

        Ok(())
    }

    /// Project name, required once a multi-branch pipeline is encoded
    pub fn require_project(&self) -> anyhow::Result<&str> {
        if self.project.is_empty() {
            anyhow::bail!("a project is required for multi-branch pipelines (--project or DEVOPS_PROJECT)");
        }
        Ok(&self.project)
    }
}
