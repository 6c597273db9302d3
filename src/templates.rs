//! Feasibility study templates
//!
//! A template is a named preset of field values for a common use case. The
//! table is static; the wizard applies a template by resetting every field
//! any template can touch and then writing the chosen template's values, so
//! nothing from a previously selected template survives the switch.

use std::collections::BTreeSet;

use crate::record::{Field, FieldValue, FormRecord};

/// One preset value inside a template
#[derive(Debug, Clone, Copy)]
pub enum Preset {
    Text(&'static str),
    List(&'static [&'static str]),
}

impl Preset {
    pub fn to_value(self) -> FieldValue {
        match self {
            Self::Text(text) => FieldValue::text(text),
            Self::List(items) => FieldValue::list(items.iter().copied()),
        }
    }
}

/// A named preset of field values
#[derive(Debug)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub fields: &'static [(Field, Preset)],
}

impl Template {
    /// Write this template's values into `record`.
    ///
    /// Kinds in the static table always match their field, so a failed
    /// assignment would be a table bug and is only logged.
    pub fn apply_to(&self, record: &mut FormRecord) {
        for (field, preset) in self.fields {
            if let Err(e) = record.set(*field, preset.to_value()) {
                tracing::error!(
                    template = self.id,
                    field = %field,
                    error = %e,
                    "template preset has wrong kind"
                );
            }
        }
    }
}

static TEMPLATES: &[Template] = &[
    Template {
        id: "email-triage",
        name: "Email triage",
        summary: "Sort, prioritise and draft replies for a shared inbox",
        fields: &[
            (Field::UseCaseName, Preset::Text("Email triage")),
            (Field::Frequency, Preset::Text("Daily")),
            (
                Field::Description,
                Preset::Text(
                    "Classify incoming messages in the shared inbox, flag urgent items and draft \
                    first replies for routine requests.",
                ),
            ),
            (
                Field::CurrentProcess,
                Preset::Text(
                    "Staff read every message, forward it to the right owner and write replies \
                    from scratch.",
                ),
            ),
            (
                Field::PainPoints,
                Preset::Text(
                    "Slow response times, inconsistent routing, urgent messages buried under \
                    routine ones.",
                ),
            ),
            (
                Field::ProposedSolution,
                Preset::Text(
                    "An assistant categorises each message, suggests an owner and prepares a \
                    draft reply for review.",
                ),
            ),
            (
                Field::AiRole,
                Preset::Text("Classification, prioritisation and first-draft replies."),
            ),
            (Field::HumanRole, Preset::Text("Reviews and sends every reply; handles escalations.")),
            (Field::Tools, Preset::List(&["Email client", "AI assistant"])),
            (Field::DataSources, Preset::List(&["Shared inbox", "Reply templates"])),
            (Field::TimeSavings, Preset::Text("30-50% less time spent sorting and drafting")),
            (
                Field::Kpis,
                Preset::List(&[
                    "Median first-response time",
                    "Routing accuracy",
                    "Drafts accepted without major edits",
                ]),
            ),
            (Field::PilotDuration, Preset::Text("4 weeks")),
        ],
    },
    Template {
        id: "meeting-summaries",
        name: "Meeting summaries",
        summary: "Turn meeting notes or transcripts into summaries and action items",
        fields: &[
            (Field::UseCaseName, Preset::Text("Meeting summaries")),
            (Field::Frequency, Preset::Text("Several times per week")),
            (
                Field::Description,
                Preset::Text(
                    "Produce a structured summary with decisions and action items after each \
                    recurring meeting.",
                ),
            ),
            (
                Field::CurrentProcess,
                Preset::Text("A rotating note-taker writes up minutes by hand after the meeting."),
            ),
            (
                Field::PainPoints,
                Preset::Text("Minutes arrive late or not at all; action items lack owners."),
            ),
            (
                Field::ProposedSolution,
                Preset::Text(
                    "Transcripts are summarised into a fixed format and circulated for \
                    confirmation.",
                ),
            ),
            (Field::AiRole, Preset::Text("Summarisation and action item extraction.")),
            (
                Field::HumanRole,
                Preset::Text("Meeting owner checks the summary before it is shared."),
            ),
            (Field::Tools, Preset::List(&["Video conferencing transcripts", "AI assistant"])),
            (Field::Kpis, Preset::List(&["Summary turnaround time", "Action items with an owner"])),
            (Field::PilotDuration, Preset::Text("6 weeks")),
        ],
    },
    Template {
        id: "document-review",
        name: "Document review",
        summary: "First-pass review of contracts, policies or reports",
        fields: &[
            (Field::UseCaseName, Preset::Text("Document review")),
            (Field::Frequency, Preset::Text("Weekly")),
            (
                Field::Description,
                Preset::Text(
                    "Run a first-pass review that highlights missing clauses, inconsistencies and \
                    open questions.",
                ),
            ),
            (
                Field::CurrentProcess,
                Preset::Text("Reviewers read each document end to end against a checklist."),
            ),
            (
                Field::PainPoints,
                Preset::Text("Review backlog, checklist items missed under time pressure."),
            ),
            (
                Field::ProposedSolution,
                Preset::Text(
                    "The assistant compares the document with the checklist and annotates gaps \
                    for the reviewer.",
                ),
            ),
            (Field::AiRole, Preset::Text("Checklist comparison and annotation.")),
            (Field::HumanRole, Preset::Text("Reviewer owns the final assessment and sign-off.")),
            (Field::DataSources, Preset::List(&["Document repository", "Review checklist"])),
            (Field::QualityImprovements, Preset::Text("Fewer missed checklist items")),
            (Field::Kpis, Preset::List(&["Review cycle time", "Issues caught before sign-off"])),
        ],
    },
    Template {
        id: "customer-support",
        name: "Customer support replies",
        summary: "Suggested answers for support tickets from the knowledge base",
        fields: &[
            (Field::UseCaseName, Preset::Text("Customer support replies")),
            (Field::Frequency, Preset::Text("Continuous")),
            (
                Field::Description,
                Preset::Text("Suggest answers to incoming tickets grounded in the knowledge base."),
            ),
            (
                Field::CurrentProcess,
                Preset::Text("Agents search the knowledge base manually and write each answer."),
            ),
            (
                Field::PainPoints,
                Preset::Text("Long handling times and inconsistent answers between agents."),
            ),
            (
                Field::ProposedSolution,
                Preset::Text("Suggested replies with linked sources appear next to each ticket."),
            ),
            (Field::AiRole, Preset::Text("Retrieval and reply drafting.")),
            (
                Field::HumanRole,
                Preset::Text("Agent edits and sends; sensitive tickets bypass the assistant."),
            ),
            (Field::Tools, Preset::List(&["Helpdesk", "AI assistant"])),
            (Field::DataSources, Preset::List(&["Knowledge base", "Resolved tickets"])),
            (
                Field::Kpis,
                Preset::List(&["Average handling time", "Customer satisfaction", "Reopen rate"]),
            ),
            (Field::PilotDuration, Preset::Text("8 weeks")),
        ],
    },
    Template {
        id: "code-review",
        name: "Code review assistance",
        summary: "Automated first-pass comments on pull requests",
        fields: &[
            (Field::UseCaseName, Preset::Text("Code review assistance")),
            (Field::Department, Preset::Text("Engineering")),
            (Field::Frequency, Preset::Text("Every pull request")),
            (
                Field::Description,
                Preset::Text(
                    "Leave first-pass review comments on style, tests and likely defects before a \
                    human review.",
                ),
            ),
            (
                Field::CurrentProcess,
                Preset::Text("Every pull request waits for a senior engineer to review it."),
            ),
            (
                Field::PainPoints,
                Preset::Text("Review queues slow delivery; routine comments repeat."),
            ),
            (
                Field::ProposedSolution,
                Preset::Text(
                    "An assistant comments on each pull request; humans focus on design and \
                    correctness.",
                ),
            ),
            (Field::AiRole, Preset::Text("Routine review comments and test gap detection.")),
            (
                Field::HumanRole,
                Preset::Text("Engineers approve or dismiss comments and own the merge decision."),
            ),
            (Field::Tools, Preset::List(&["Code hosting platform", "AI assistant"])),
            (Field::Kpis, Preset::List(&["Time to first review", "Defects found after merge"])),
        ],
    },
];

/// All templates, in display order
pub fn all() -> &'static [Template] {
    TEMPLATES
}

/// Look up a template by id
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Every field that at least one template presets
pub fn templated_fields() -> BTreeSet<Field> {
    TEMPLATES
        .iter()
        .flat_map(|t| t.fields.iter().map(|(field, _)| *field))
        .collect()
}
