//! Persisted draft snapshot
//!
//! Stored layout: `{ "formData": {...}, "currentStep": n, "lastSaved": "<RFC 3339>" }`.
//! Anything that does not parse into exactly this shape, including a step
//! index the current wizard does not have or a risk list missing one of the
//! default categories, is treated as no draft at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WizardStep;
use crate::error::Result;
use crate::record::FormRecord;
use crate::types::RiskCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Draft {
    pub form_data: FormRecord,
    pub current_step: usize,
    pub last_saved: DateTime<Utc>,
}

impl Draft {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored draft, `None` when it is corrupt or from an incompatible shape
    pub fn parse(raw: &str) -> Option<Self> {
        let draft: Self = match serde_json::from_str(raw) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unreadable draft");
                return None;
            }
        };
        if draft.current_step >= WizardStep::TOTAL_STEPS {
            tracing::debug!(step = draft.current_step, "ignoring draft with unknown step");
            return None;
        }
        let missing = RiskCategory::defaults()
            .find(|category| !draft.form_data.risks.iter().any(|r| r.category == *category));
        if let Some(category) = missing {
            tracing::debug!(%category, "ignoring draft without a default risk");
            return None;
        }
        Some(draft)
    }
}
