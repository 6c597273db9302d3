//! Feasibility study wizard
//!
//! This module is organized into:
//! - `WizardStep` - the fixed, linear sequence of wizard screens
//! - `WizardController` - owns the form record, step position and autosave
//! - `debounce` - single-slot deferred save
//! - `draft` - the persisted snapshot format

mod debounce;
mod draft;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::{PlaybookError, Result};
use crate::record::{Field, FieldValue, FormRecord, OrgDefaults, RiskEntry, RiskUpdate};
use crate::render::{self, ExportedDocument};
use crate::storage::DraftStore;
use crate::templates;
use crate::types::RiskCategory;

pub use debounce::Debouncer;
pub use draft::Draft;

/// Storage key used when none is configured
pub const DEFAULT_DRAFT_KEY: &str = "feasibility-study-draft";

/// Autosave delay used when none is configured
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

// ============================================================================
// Wizard steps
// ============================================================================

/// Screens of the feasibility study wizard, in order.
///
/// ```text
/// Template -> UseCase -> CurrentState -> ProposedWorkflow -> Benefits
///          -> Risks -> SuccessCriteria -> Recommendation -> Review
/// ```
///
/// Users move freely within the steps they have already visited and may
/// step one past the furthest visited step, never further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Template,
    UseCase,
    CurrentState,
    ProposedWorkflow,
    Benefits,
    Risks,
    SuccessCriteria,
    Recommendation,
    Review,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 9;

    /// All steps in order
    pub const fn all() -> &'static [Self] {
        &[
            Self::Template,
            Self::UseCase,
            Self::CurrentState,
            Self::ProposedWorkflow,
            Self::Benefits,
            Self::Risks,
            Self::SuccessCriteria,
            Self::Recommendation,
            Self::Review,
        ]
    }

    /// Zero-based position in the sequence
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Get the display title for this step.
    pub fn title(self) -> &'static str {
        match self {
            Self::Template => "Choose a Starting Point",
            Self::UseCase => "Use Case Summary",
            Self::CurrentState => "Current State Assessment",
            Self::ProposedWorkflow => "Proposed Workflow",
            Self::Benefits => "Expected Benefits",
            Self::Risks => "Risks and Mitigations",
            Self::SuccessCriteria => "Success Criteria",
            Self::Recommendation => "Recommendation",
            Self::Review => "Review and Export",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Settings a controller is constructed with
#[derive(Debug, Clone)]
pub struct WizardSettings {
    /// Key the draft is stored under; one controller owns one key
    pub draft_key: String,
    /// Quiet period after the last edit before the draft is written
    pub autosave_delay: Duration,
    /// Organization values re-applied on "start over"
    pub org: OrgDefaults,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            org: OrgDefaults::default(),
        }
    }
}

/// Drives the wizard over a single [`FormRecord`] and keeps a draft of it.
///
/// Every edit restarts the autosave timer; the host calls [`poll`] from its
/// event loop and the draft is written once the user has been idle for the
/// configured delay. Storage failures never reach the caller: a failed write
/// switches the session to memory-only.
///
/// [`poll`]: WizardController::poll
pub struct WizardController {
    store: Box<dyn DraftStore>,
    clock: Box<dyn Clock>,
    settings: WizardSettings,
    record: FormRecord,
    current: WizardStep,
    highest_visited: usize,
    selected_template: Option<&'static str>,
    /// Draft found at start-up, waiting for resume or discard
    pending_draft: Option<Draft>,
    autosave: Debouncer,
    autosave_enabled: bool,
    last_saved: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("draft_key", &self.settings.draft_key)
            .field("current", &self.current)
            .field("highest_visited", &self.highest_visited)
            .field("selected_template", &self.selected_template)
            .field("pending_draft", &self.pending_draft.is_some())
            .field("autosave_pending", &self.autosave.is_pending())
            .field("autosave_enabled", &self.autosave_enabled)
            .finish_non_exhaustive()
    }
}

impl WizardController {
    /// Create a controller holding a fresh record with organization defaults.
    ///
    /// Nothing is read from storage until [`initialize`](Self::initialize).
    pub fn new(
        store: Box<dyn DraftStore>,
        clock: Box<dyn Clock>,
        settings: WizardSettings,
    ) -> Self {
        let record = FormRecord::with_org_defaults(&settings.org);
        let autosave = Debouncer::new(settings.autosave_delay);
        Self {
            store,
            clock,
            settings,
            record,
            current: WizardStep::default(),
            highest_visited: 0,
            selected_template: None,
            pending_draft: None,
            autosave,
            autosave_enabled: true,
            last_saved: None,
        }
    }

    // ------------------------------------------------------------------------
    // Draft lifecycle
    // ------------------------------------------------------------------------

    /// Look for an unfinished draft.
    ///
    /// A readable draft is held back until the user chooses
    /// [`resume_draft`](Self::resume_draft) or
    /// [`discard_draft`](Self::discard_draft); until then every edit and
    /// navigation call fails with [`PlaybookError::DraftPending`] so nothing
    /// typed before the decision is silently replaced. Missing, unreadable
    /// or corrupt drafts leave the controller at its defaults.
    pub fn initialize(&mut self) -> Option<&Draft> {
        let raw = match self.store.load(&self.settings.draft_key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "draft storage unavailable, continuing without resume");
                None
            }
        };

        self.pending_draft = raw.as_deref().and_then(Draft::parse);
        match &self.pending_draft {
            Some(draft) => tracing::info!(
                step = draft.current_step,
                last_saved = %draft.last_saved,
                "found unfinished draft"
            ),
            None => tracing::debug!("no draft to resume"),
        }
        self.pending_draft.as_ref()
    }

    /// Draft found by `initialize` that is still awaiting a decision
    pub fn pending_draft(&self) -> Option<&Draft> {
        self.pending_draft.as_ref()
    }

    /// Make the pending draft live. Returns false when there is none.
    ///
    /// The stored layout only keeps the current step, so steps visited past
    /// it before the reload are reachable again only by moving forward.
    pub fn resume_draft(&mut self) -> bool {
        let Some(draft) = self.pending_draft.take() else {
            return false;
        };
        self.record = draft.form_data;
        self.current = WizardStep::from_index(draft.current_step).unwrap_or_default();
        self.highest_visited = self.current.index();
        self.last_saved = Some(draft.last_saved);
        self.selected_template = None;
        tracing::info!(step = self.current.index(), "resumed draft");
        true
    }

    /// Throw away the stored draft and start from a blank record
    pub fn discard_draft(&mut self) {
        self.clear_and_restart(FormRecord::new());
        tracing::info!("draft discarded");
    }

    /// Throw away the stored draft and start a new study with organization defaults
    pub fn reset_for_new_entry(&mut self) {
        self.clear_and_restart(FormRecord::with_org_defaults(&self.settings.org));
        tracing::info!("started new study");
    }

    fn clear_and_restart(&mut self, record: FormRecord) {
        // Cancel first so no snapshot of the old record can land after the removal
        self.autosave.cancel();
        self.pending_draft = None;
        if let Err(e) = self.store.remove(&self.settings.draft_key) {
            tracing::warn!(error = %e, "failed to clear stored draft");
        }
        self.record = record;
        self.current = WizardStep::default();
        self.highest_visited = 0;
        self.selected_template = None;
        self.last_saved = None;
    }

    // ------------------------------------------------------------------------
    // Autosave
    // ------------------------------------------------------------------------

    fn schedule_save(&mut self) {
        if !self.autosave_enabled {
            return;
        }
        self.autosave.schedule(self.clock.now());
    }

    fn ensure_no_pending_draft(&self) -> Result<()> {
        if self.pending_draft.is_some() {
            return Err(PlaybookError::DraftPending);
        }
        Ok(())
    }

    /// Write the draft if the autosave delay has elapsed. Returns true if a
    /// write was attempted.
    pub fn poll(&mut self) -> bool {
        if !self.autosave.take_due(self.clock.now()) {
            return false;
        }
        self.write_draft();
        true
    }

    /// Write any pending autosave immediately. Returns true if a write was
    /// attempted.
    pub fn flush(&mut self) -> bool {
        if !self.autosave.take() {
            return false;
        }
        self.write_draft();
        true
    }

    /// Drop a pending autosave without writing it
    pub fn cancel_pending_save(&mut self) {
        self.autosave.cancel();
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// False once a write has failed; the session is memory-only from then on
    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    fn write_draft(&mut self) {
        let draft = Draft {
            form_data: self.record.clone(),
            current_step: self.current.index(),
            last_saved: self.clock.now_utc(),
        };
        let result = draft
            .to_json()
            .and_then(|json| self.store.save(&self.settings.draft_key, &json));
        match result {
            Ok(()) => {
                tracing::debug!(step = draft.current_step, "draft saved");
                self.last_saved = Some(draft.last_saved);
            }
            Err(e) => {
                tracing::warn!(error = %e, "draft save failed, autosave disabled for this session");
                self.autosave_enabled = false;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Record edits
    // ------------------------------------------------------------------------

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn selected_template(&self) -> Option<&'static str> {
        self.selected_template
    }

    /// Apply a template, or clear back to defaults with `None`.
    ///
    /// Switching templates resets every templated field and the risk list
    /// before applying the new values, so nothing from the previous template
    /// survives. An unknown id leaves the record untouched.
    pub fn select_template(&mut self, id: Option<&str>) -> Result<()> {
        self.ensure_no_pending_draft()?;
        match id {
            None => {
                self.record = FormRecord::with_org_defaults(&self.settings.org);
                self.selected_template = None;
            }
            Some(id) => {
                let template = templates::find(id)
                    .ok_or_else(|| PlaybookError::UnknownTemplate(id.to_string()))?;
                let blank = FormRecord::new();
                for field in templates::templated_fields() {
                    self.record.set(field, blank.get(field))?;
                }
                template.apply_to(&mut self.record);
                self.record.risks = RiskEntry::default_set();
                self.selected_template = Some(template.id);
            }
        }
        tracing::debug!(template = ?self.selected_template, "template selected");
        self.schedule_save();
        Ok(())
    }

    /// Assign a field; the value must match the field's kind
    pub fn update_field(&mut self, field: Field, value: FieldValue) -> Result<()> {
        self.ensure_no_pending_draft()?;
        self.record.set(field, value)?;
        self.schedule_save();
        Ok(())
    }

    /// Append a custom risk and return its index
    pub fn add_risk(&mut self) -> Result<usize> {
        self.ensure_no_pending_draft()?;
        self.record.risks.push(RiskEntry::new(RiskCategory::Custom));
        self.schedule_save();
        Ok(self.record.risks.len() - 1)
    }

    /// Remove a custom risk. Default entries are rejected and the list is unchanged.
    pub fn remove_risk(&mut self, index: usize) -> Result<RiskEntry> {
        self.ensure_no_pending_draft()?;
        let risk = self
            .record
            .risks
            .get(index)
            .ok_or(PlaybookError::RiskIndex(index))?;
        if !risk.category.is_custom() {
            return Err(PlaybookError::DefaultRiskRemoval(index));
        }
        let removed = self.record.risks.remove(index);
        self.schedule_save();
        Ok(removed)
    }

    pub fn update_risk(&mut self, index: usize, update: RiskUpdate) -> Result<()> {
        self.ensure_no_pending_draft()?;
        self.record
            .risks
            .get_mut(index)
            .ok_or(PlaybookError::RiskIndex(index))?
            .apply(update);
        self.schedule_save();
        Ok(())
    }

    /// Append an empty KPI and return its index
    pub fn add_kpi(&mut self) -> Result<usize> {
        self.ensure_no_pending_draft()?;
        self.record.kpis.push(String::new());
        self.schedule_save();
        Ok(self.record.kpis.len() - 1)
    }

    pub fn remove_kpi(&mut self, index: usize) -> Result<String> {
        self.ensure_no_pending_draft()?;
        if index >= self.record.kpis.len() {
            return Err(PlaybookError::KpiIndex(index));
        }
        let removed = self.record.kpis.remove(index);
        self.schedule_save();
        Ok(removed)
    }

    pub fn update_kpi(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.ensure_no_pending_draft()?;
        let slot = self
            .record
            .kpis
            .get_mut(index)
            .ok_or(PlaybookError::KpiIndex(index))?;
        *slot = value.into();
        self.schedule_save();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    pub fn highest_visited(&self) -> usize {
        self.highest_visited
    }

    /// Whether the step indicator should let the user jump to `index`
    pub fn is_step_reachable(&self, index: usize) -> bool {
        index < WizardStep::TOTAL_STEPS && index <= self.highest_visited
    }

    /// Move to `index`: any visited step, or the one right after the furthest visited
    pub fn go_to_step(&mut self, index: usize) -> Result<WizardStep> {
        self.ensure_no_pending_draft()?;
        let step = WizardStep::from_index(index).ok_or(PlaybookError::StepOutOfRange {
            index,
            total: WizardStep::TOTAL_STEPS,
        })?;
        if index > self.highest_visited + 1 {
            return Err(PlaybookError::StepNotReachable {
                index,
                highest: self.highest_visited,
            });
        }
        self.current = step;
        self.highest_visited = self.highest_visited.max(index);
        self.schedule_save();
        Ok(step)
    }

    pub fn next_step(&mut self) -> Result<WizardStep> {
        self.go_to_step(self.current.index() + 1)
    }

    pub fn previous_step(&mut self) -> Result<WizardStep> {
        let step = self.current.previous().ok_or(PlaybookError::AtFirstStep)?;
        self.go_to_step(step.index())
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// Markdown rendering of the current record
    pub fn render(&self) -> String {
        render::render_markdown(&self.record)
    }

    /// Rendered document together with its download file name
    pub fn export_document(&self) -> ExportedDocument {
        ExportedDocument::from_record(&self.record)
    }
}
