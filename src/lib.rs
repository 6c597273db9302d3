//! Playbook Library
//!
//! Feasibility study wizard with draft autosave and markdown export, plus a
//! small ROI calculator. The `playbook` binary is a thin command-line front
//! end over these modules.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod record;
pub mod render;
pub mod roi;
pub mod storage;
pub mod templates;
pub mod types;
pub mod wizard;

// Re-export main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PlaybookConfig;
pub use error::{PlaybookError, Result};
pub use record::{Field, FieldKind, FieldValue, FormRecord, OrgDefaults, RiskEntry, RiskUpdate};
pub use render::{ExportedDocument, NOT_PROVIDED, render_markdown};
pub use roi::{RoiInputs, RoiResult};
pub use storage::{DraftStore, FileStore, MemoryStore};
pub use types::{RiskCategory, Severity};
pub use wizard::{Draft, WizardController, WizardSettings, WizardStep};
