//! Feasibility study form record
//!
//! `FormRecord` is the single aggregate the wizard edits. The field set is
//! fixed: every scalar or list field is named by a [`Field`] variant so that
//! edits coming from the command line or a template table are type-checked
//! against the field's [`FieldKind`] before they touch the record.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{PlaybookError, Result};
use crate::types::{RiskCategory, Severity};

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::List => "list",
        }
    }
}

/// Every editable field of the record except the risk table.
///
/// The string form matches the JSON key, so `"useCaseName".parse::<Field>()`
/// names the same field the draft file stores under `useCaseName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    // Header block
    OrganizationName,
    PreparedBy,
    Date,

    // 1. Use-case summary
    UseCaseName,
    Department,
    ProcessOwner,
    Frequency,
    Description,

    // 2. Current state
    CurrentProcess,
    TimeSpent,
    Volume,
    PainPoints,

    // 3. Proposed workflow
    ProposedSolution,
    AiRole,
    HumanRole,
    Tools,
    DataSources,

    // 4. Expected benefits
    TimeSavings,
    QualityImprovements,
    CostImpact,
    OtherBenefits,

    // 6. Success criteria
    Kpis,
    PilotDuration,
    EvaluationMethod,

    // 7. Recommendation
    Recommendation,
    Rationale,
    NextSteps,
}

impl Field {
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Tools | Self::DataSources | Self::Kpis => FieldKind::List,
            _ => FieldKind::Text,
        }
    }
}

/// A value written into a [`Field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::List(_) => FieldKind::List,
        }
    }
}

/// One identified risk, its mitigation and severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskEntry {
    pub category: RiskCategory,
    pub description: String,
    pub mitigation: String,
    pub severity: Severity,
}

impl RiskEntry {
    pub fn new(category: RiskCategory) -> Self {
        Self {
            category,
            description: String::new(),
            mitigation: String::new(),
            severity: Severity::default(),
        }
    }

    /// The fixed set of entries every record starts with
    pub fn default_set() -> Vec<Self> {
        RiskCategory::defaults().map(Self::new).collect()
    }
}

/// A single edit to a risk entry.
///
/// The category is fixed when the entry is created, which keeps the set of
/// default entries intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskUpdate {
    Description(String),
    Mitigation(String),
    Severity(Severity),
}

impl RiskEntry {
    pub fn apply(&mut self, update: RiskUpdate) {
        match update {
            RiskUpdate::Description(text) => self.description = text,
            RiskUpdate::Mitigation(text) => self.mitigation = text,
            RiskUpdate::Severity(severity) => self.severity = severity,
        }
    }
}

/// Values supplied by the surrounding organization rather than the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgDefaults {
    pub organization_name: String,
    pub prepared_by: String,
    /// Study date, usually today in `YYYY-MM-DD` form
    pub date: String,
}

/// Maps a text field to its slot; `mut` selects a mutable borrow.
macro_rules! text_slot {
    ($record:expr, $field:expr, $($mutability:tt)?) => {
        match $field {
            Field::OrganizationName => Some(&$($mutability)? $record.organization_name),
            Field::PreparedBy => Some(&$($mutability)? $record.prepared_by),
            Field::Date => Some(&$($mutability)? $record.date),
            Field::UseCaseName => Some(&$($mutability)? $record.use_case_name),
            Field::Department => Some(&$($mutability)? $record.department),
            Field::ProcessOwner => Some(&$($mutability)? $record.process_owner),
            Field::Frequency => Some(&$($mutability)? $record.frequency),
            Field::Description => Some(&$($mutability)? $record.description),
            Field::CurrentProcess => Some(&$($mutability)? $record.current_process),
            Field::TimeSpent => Some(&$($mutability)? $record.time_spent),
            Field::Volume => Some(&$($mutability)? $record.volume),
            Field::PainPoints => Some(&$($mutability)? $record.pain_points),
            Field::ProposedSolution => Some(&$($mutability)? $record.proposed_solution),
            Field::AiRole => Some(&$($mutability)? $record.ai_role),
            Field::HumanRole => Some(&$($mutability)? $record.human_role),
            Field::TimeSavings => Some(&$($mutability)? $record.time_savings),
            Field::QualityImprovements => Some(&$($mutability)? $record.quality_improvements),
            Field::CostImpact => Some(&$($mutability)? $record.cost_impact),
            Field::OtherBenefits => Some(&$($mutability)? $record.other_benefits),
            Field::PilotDuration => Some(&$($mutability)? $record.pilot_duration),
            Field::EvaluationMethod => Some(&$($mutability)? $record.evaluation_method),
            Field::Recommendation => Some(&$($mutability)? $record.recommendation),
            Field::Rationale => Some(&$($mutability)? $record.rationale),
            Field::NextSteps => Some(&$($mutability)? $record.next_steps),
            Field::Tools | Field::DataSources | Field::Kpis => None,
        }
    };
}

macro_rules! list_slot {
    ($record:expr, $field:expr, $($mutability:tt)?) => {
        match $field {
            Field::Tools => Some(&$($mutability)? $record.tools),
            Field::DataSources => Some(&$($mutability)? $record.data_sources),
            Field::Kpis => Some(&$($mutability)? $record.kpis),
            _ => None,
        }
    };
}

/// The feasibility study being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormRecord {
    pub organization_name: String,
    pub prepared_by: String,
    pub date: String,

    pub use_case_name: String,
    pub department: String,
    pub process_owner: String,
    pub frequency: String,
    pub description: String,

    pub current_process: String,
    pub time_spent: String,
    pub volume: String,
    pub pain_points: String,

    pub proposed_solution: String,
    pub ai_role: String,
    pub human_role: String,
    pub tools: Vec<String>,
    pub data_sources: Vec<String>,

    pub time_savings: String,
    pub quality_improvements: String,
    pub cost_impact: String,
    pub other_benefits: String,

    pub risks: Vec<RiskEntry>,

    pub kpis: Vec<String>,
    pub pilot_duration: String,
    pub evaluation_method: String,

    pub recommendation: String,
    pub rationale: String,
    pub next_steps: String,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            prepared_by: String::new(),
            date: String::new(),
            use_case_name: String::new(),
            department: String::new(),
            process_owner: String::new(),
            frequency: String::new(),
            description: String::new(),
            current_process: String::new(),
            time_spent: String::new(),
            volume: String::new(),
            pain_points: String::new(),
            proposed_solution: String::new(),
            ai_role: String::new(),
            human_role: String::new(),
            tools: Vec::new(),
            data_sources: Vec::new(),
            time_savings: String::new(),
            quality_improvements: String::new(),
            cost_impact: String::new(),
            other_benefits: String::new(),
            risks: RiskEntry::default_set(),
            kpis: Vec::new(),
            pilot_duration: String::new(),
            evaluation_method: String::new(),
            recommendation: String::new(),
            rationale: String::new(),
            next_steps: String::new(),
        }
    }
}

impl FormRecord {
    /// Blank record with the default risk set
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank record with organization-level values filled in
    pub fn with_org_defaults(org: &OrgDefaults) -> Self {
        Self {
            organization_name: org.organization_name.clone(),
            prepared_by: org.prepared_by.clone(),
            date: org.date.clone(),
            ..Self::default()
        }
    }

    fn text_slot(&mut self, field: Field) -> Option<&mut String> {
        text_slot!(self, field, mut)
    }

    fn list_slot(&mut self, field: Field) -> Option<&mut Vec<String>> {
        list_slot!(self, field, mut)
    }

    /// Current value of a field
    pub fn get(&self, field: Field) -> FieldValue {
        match field.kind() {
            FieldKind::Text => {
                FieldValue::Text(text_slot!(self, field,).cloned().unwrap_or_default())
            }
            FieldKind::List => {
                FieldValue::List(list_slot!(self, field,).cloned().unwrap_or_default())
            }
        }
    }

    /// Assign a value, rejecting a value of the wrong kind.
    ///
    /// On error the record is unchanged.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<()> {
        let expected = field.kind();
        if value.kind() != expected {
            return Err(PlaybookError::FieldKind {
                field: field.to_string(),
                expected: expected.describe(),
            });
        }
        match value {
            FieldValue::Text(text) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = text;
                }
            }
            FieldValue::List(items) => {
                if let Some(slot) = self.list_slot(field) {
                    *slot = items;
                }
            }
        }
        Ok(())
    }

    /// Number of default (non-custom) risk entries
    pub fn default_risk_count(&self) -> usize {
        self.risks.iter().filter(|r| !r.category.is_custom()).count()
    }
}
