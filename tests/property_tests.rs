//! Property-Based Tests for the playbook
//!
//! Uses proptest for testing invariants of the wizard:
//! - Draft serialization round-trips for any reachable record
//! - Rendering is deterministic and always structurally complete
//! - Template switches never leak values
//! - Any burst of edits inside the autosave window is one write

use std::time::Duration;

use chrono::{TimeZone, Utc};
use playbook::templates;
use playbook::{
    Draft, Field, FieldKind, FieldValue, FormRecord, ManualClock, MemoryStore, OrgDefaults,
    RiskUpdate, Severity, WizardController, WizardSettings, NOT_PROVIDED, render_markdown,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;

const KEY: &str = "feasibility-study-draft";
const DELAY: Duration = Duration::from_millis(500);

fn new_wizard(store: &MemoryStore, clock: &ManualClock) -> WizardController {
    let settings = WizardSettings {
        draft_key: KEY.into(),
        autosave_delay: DELAY,
        org: OrgDefaults {
            organization_name: "Acme".into(),
            prepared_by: String::new(),
            date: "2026-10-19".into(),
        },
    };
    WizardController::new(Box::new(store.clone()), Box::new(clock.clone()), settings)
}

fn new_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
}

// =============================================================================
// Strategies
// =============================================================================

fn field_strategy() -> impl Strategy<Value = Field> {
    let fields: Vec<Field> = Field::iter().collect();
    prop::sample::select(fields)
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
    ]
}

fn template_id_strategy() -> impl Strategy<Value = &'static str> {
    let ids: Vec<&'static str> = templates::all().iter().map(|t| t.id).collect();
    prop::sample::select(ids)
}

/// Free text including markdown-hostile characters and blank values
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-zA-Z0-9 |\\n\\-*#]{0,40}",
        any::<String>(),
    ]
}

/// One public mutation of the controller
#[derive(Debug, Clone)]
enum Edit {
    Set(Field, String, Vec<String>),
    Template(Option<&'static str>),
    AddRisk,
    RemoveRisk(usize),
    RiskDescription(usize, String),
    RiskSeverity(usize, Severity),
    AddKpi,
    RemoveKpi(usize),
    UpdateKpi(usize, String),
    Step(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (field_strategy(), text_strategy(), prop::collection::vec(text_strategy(), 0..4))
            .prop_map(|(f, t, l)| Edit::Set(f, t, l)),
        1 => prop::option::of(template_id_strategy()).prop_map(Edit::Template),
        1 => Just(Edit::AddRisk),
        1 => (0usize..8).prop_map(Edit::RemoveRisk),
        1 => ((0usize..8), text_strategy()).prop_map(|(i, t)| Edit::RiskDescription(i, t)),
        1 => ((0usize..8), severity_strategy()).prop_map(|(i, s)| Edit::RiskSeverity(i, s)),
        1 => Just(Edit::AddKpi),
        1 => (0usize..4).prop_map(Edit::RemoveKpi),
        1 => ((0usize..4), text_strategy()).prop_map(|(i, t)| Edit::UpdateKpi(i, t)),
        1 => (0usize..10).prop_map(Edit::Step),
    ]
}

/// Apply an edit; rejected edits are expected and ignored
fn apply(wizard: &mut WizardController, edit: &Edit) {
    let _ = match edit.clone() {
        Edit::Set(field, text, list) => {
            let value = match field.kind() {
                FieldKind::Text => FieldValue::Text(text),
                FieldKind::List => FieldValue::List(list),
            };
            wizard.update_field(field, value)
        }
        Edit::Template(id) => wizard.select_template(id),
        Edit::AddRisk => wizard.add_risk().map(drop),
        Edit::RemoveRisk(i) => wizard.remove_risk(i).map(drop),
        Edit::RiskDescription(i, t) => wizard.update_risk(i, RiskUpdate::Description(t)),
        Edit::RiskSeverity(i, s) => wizard.update_risk(i, RiskUpdate::Severity(s)),
        Edit::AddKpi => wizard.add_kpi().map(drop),
        Edit::RemoveKpi(i) => wizard.remove_kpi(i).map(drop),
        Edit::UpdateKpi(i, t) => wizard.update_kpi(i, t),
        Edit::Step(i) => wizard.go_to_step(i).map(drop),
    };
}

// =============================================================================
// Record properties
// =============================================================================

proptest! {
    /// Any reachable record survives a draft save and parse unchanged
    #[test]
    fn draft_roundtrip(edits in prop::collection::vec(edit_strategy(), 0..30)) {
        let store = MemoryStore::new();
        let clock = new_clock();
        let mut wizard = new_wizard(&store, &clock);
        for edit in &edits {
            apply(&mut wizard, edit);
        }

        let json = serde_json::to_string(wizard.record()).expect("serialize");
        let parsed: FormRecord = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(&parsed, wizard.record());

        wizard.flush();
        if let Some(raw) = store.peek(KEY) {
            let draft = Draft::parse(&raw).expect("stored draft parses");
            prop_assert_eq!(&draft.form_data, wizard.record());
            prop_assert_eq!(draft.current_step, wizard.current_step().index());
        }
    }

    /// Default risks are present after any sequence of edits
    #[test]
    fn default_risks_always_present(edits in prop::collection::vec(edit_strategy(), 0..30)) {
        let store = MemoryStore::new();
        let clock = new_clock();
        let mut wizard = new_wizard(&store, &clock);
        for edit in &edits {
            apply(&mut wizard, edit);
        }
        prop_assert_eq!(wizard.record().default_risk_count(), 4);
    }

    /// Rendering twice gives the same text, and never loses a section
    #[test]
    fn render_is_deterministic(edits in prop::collection::vec(edit_strategy(), 0..20)) {
        let store = MemoryStore::new();
        let clock = new_clock();
        let mut wizard = new_wizard(&store, &clock);
        for edit in &edits {
            apply(&mut wizard, edit);
        }

        let first = render_markdown(wizard.record());
        let second = render_markdown(wizard.record());
        prop_assert_eq!(&first, &second);
        for n in 1..=7 {
            let heading = format!("## {n}. ");
            prop_assert!(first.contains(&heading));
        }
    }

    /// A blank value renders as the placeholder even when everything else is filled in
    #[test]
    fn blank_field_renders_placeholder(field in field_strategy(), blank in "[ \\t]{0,5}") {
        let mut record = FormRecord::new();
        for other in Field::iter() {
            let filled = match other.kind() {
                FieldKind::Text => FieldValue::text("filled"),
                FieldKind::List => FieldValue::list(["filled"]),
            };
            record.set(other, filled).expect("matching kind");
        }
        for risk in &mut record.risks {
            risk.description = "filled".into();
            risk.mitigation = "filled".into();
        }
        prop_assert!(!render_markdown(&record).contains(NOT_PROVIDED));

        let value = match field.kind() {
            FieldKind::Text => FieldValue::Text(blank),
            FieldKind::List => FieldValue::List(vec![blank]),
        };
        record.set(field, value).expect("matching kind");
        prop_assert!(render_markdown(&record).contains(NOT_PROVIDED));
    }

    /// After A then B, every templated value comes from B or the defaults
    #[test]
    fn template_switch_does_not_leak(a in template_id_strategy(), b in template_id_strategy()) {
        let store = MemoryStore::new();
        let clock = new_clock();
        let mut wizard = new_wizard(&store, &clock);
        wizard.select_template(Some(a)).expect("template a");
        wizard.select_template(Some(b)).expect("template b");

        let mut only_b = FormRecord::with_org_defaults(&OrgDefaults {
            organization_name: "Acme".into(),
            prepared_by: String::new(),
            date: "2026-10-19".into(),
        });
        templates::find(b).expect("template b").apply_to(&mut only_b);
        prop_assert_eq!(wizard.record(), &only_b);
    }

    /// Any burst of edits inside the window produces exactly one write of the final state
    #[test]
    fn debounce_coalesces_bursts(
        values in prop::collection::vec("[a-z]{1,10}", 1..20),
        gap_ms in 0u64..500,
    ) {
        let store = MemoryStore::new();
        let clock = new_clock();
        let mut wizard = new_wizard(&store, &clock);

        for value in &values {
            wizard
                .update_field(Field::Description, FieldValue::text(value.clone()))
                .expect("update");
            clock.advance(Duration::from_millis(gap_ms));
            wizard.poll();
        }
        prop_assert_eq!(store.write_count(), 0);

        clock.advance(DELAY);
        wizard.poll();
        prop_assert_eq!(store.write_count(), 1);
        let draft = Draft::parse(&store.peek(KEY).expect("draft")).expect("parse");
        prop_assert_eq!(&draft.form_data.description, values.last().expect("non-empty"));
    }
}
