//! Configuration file handling for the playbook
//!
//! The configuration is a small JSON file carrying organization-level
//! defaults and draft storage settings. A missing file means built-in
//! defaults; command-line flags override individual values afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::record::OrgDefaults;
use crate::storage::is_valid_key;
use crate::wizard::{DEFAULT_AUTOSAVE_DELAY, DEFAULT_DRAFT_KEY, WizardSettings};

/// Directory drafts are kept in when none is configured
pub const DEFAULT_STORAGE_DIR: &str = ".playbook";

/// Playbook configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybookConfig {
    /// Organization name stamped on every new study
    pub organization_name: String,
    /// Default author for new studies
    pub prepared_by: String,
    /// Directory that holds draft files
    pub storage_dir: PathBuf,
    /// Storage key of the feasibility study draft
    pub draft_key: String,
    /// Idle time before an edit is written to the draft
    pub autosave_delay_ms: u64,
}

impl Default for PlaybookConfig {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            prepared_by: String::new(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            autosave_delay_ms: u64::try_from(DEFAULT_AUTOSAVE_DELAY.as_millis()).unwrap_or(500),
        }
    }
}

impl PlaybookConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !is_valid_key(&self.draft_key) {
            anyhow::bail!(
                "Draft key {:?} must be non-empty and use only letters, digits, '-', '_' or '.'",
                self.draft_key
            );
        }

        if self.autosave_delay_ms == 0 {
            anyhow::bail!("Autosave delay must be greater than zero");
        }

        if self.storage_dir.as_os_str().is_empty() {
            anyhow::bail!("Storage directory must be specified");
        }

        Ok(())
    }

    /// Organization defaults for a study dated `date`
    pub fn org_defaults(&self, date: impl Into<String>) -> OrgDefaults {
        OrgDefaults {
            organization_name: self.organization_name.clone(),
            prepared_by: self.prepared_by.clone(),
            date: date.into(),
        }
    }

    /// Controller settings for a study dated `date`
    pub fn wizard_settings(&self, date: impl Into<String>) -> WizardSettings {
        WizardSettings {
            draft_key: self.draft_key.clone(),
            autosave_delay: Duration::from_millis(self.autosave_delay_ms),
            org: self.org_defaults(date),
        }
    }
}
