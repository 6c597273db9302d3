//! Markdown rendering of a feasibility study
//!
//! Rendering is a pure function of the record. Every field appears in the
//! output whether or not it has been filled in; blank values are written as
//! [`NOT_PROVIDED`] so a document exported halfway through the wizard still
//! has every section and row.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::FormRecord;

/// Placeholder for blank or whitespace-only values
pub const NOT_PROVIDED: &str = "[Not provided]";

/// File name used when the study has no usable title
pub const DEFAULT_EXPORT_NAME: &str = "feasibility-study.md";

fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED
    } else {
        trimmed
    }
}

/// Value for a table cell: placeholder when blank, pipes escaped, line breaks as `<br>`
fn cell(value: &str) -> String {
    or_placeholder(value)
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn joined(items: &[String]) -> String {
    let filled: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    filled.join(", ")
}

fn labelled(out: &mut String, label: &str, value: &str) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "**{label}:** {}\n", or_placeholder(value));
}

/// Render the study as a markdown document
pub fn render_markdown(record: &FormRecord) -> String {
    let mut out = String::with_capacity(4096);

    let _ = writeln!(
        out,
        "# AI Feasibility Study: {}\n",
        or_placeholder(&record.use_case_name)
    );
    let _ = writeln!(out, "**Organization:** {}  ", or_placeholder(&record.organization_name));
    let _ = writeln!(out, "**Prepared by:** {}  ", or_placeholder(&record.prepared_by));
    let _ = writeln!(out, "**Date:** {}\n", or_placeholder(&record.date));
    out.push_str("---\n\n");

    out.push_str("## 1. Use Case Summary\n\n");
    out.push_str("| Item | Details |\n|------|---------|\n");
    for (label, value) in [
        ("Task/process", &record.use_case_name),
        ("Department", &record.department),
        ("Process owner", &record.process_owner),
        ("Frequency", &record.frequency),
        ("Description", &record.description),
    ] {
        let _ = writeln!(out, "| {label} | {} |", cell(value));
    }
    out.push('\n');

    out.push_str("## 2. Current State Assessment\n\n");
    labelled(&mut out, "Current process", &record.current_process);
    labelled(&mut out, "Time spent", &record.time_spent);
    labelled(&mut out, "Volume", &record.volume);
    labelled(&mut out, "Pain points", &record.pain_points);

    out.push_str("## 3. Proposed Workflow\n\n");
    labelled(&mut out, "Proposed solution", &record.proposed_solution);
    labelled(&mut out, "AI role", &record.ai_role);
    labelled(&mut out, "Human role and oversight", &record.human_role);
    labelled(&mut out, "Tools", &joined(&record.tools));
    labelled(&mut out, "Data sources", &joined(&record.data_sources));

    out.push_str("## 4. Expected Benefits\n\n");
    labelled(&mut out, "Time savings", &record.time_savings);
    labelled(&mut out, "Quality improvements", &record.quality_improvements);
    labelled(&mut out, "Cost impact", &record.cost_impact);
    labelled(&mut out, "Other benefits", &record.other_benefits);

    out.push_str("## 5. Risks and Mitigations\n\n");
    out.push_str("| Category | Description | Mitigation | Severity |\n");
    out.push_str("|----------|-------------|------------|----------|\n");
    for risk in &record.risks {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            risk.category.label(),
            cell(&risk.description),
            cell(&risk.mitigation),
            risk.severity.label()
        );
    }
    out.push('\n');

    out.push_str("## 6. Success Criteria\n\n");
    out.push_str("**Key performance indicators:**\n\n");
    let kpis: Vec<&str> = record
        .kpis
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if kpis.is_empty() {
        let _ = writeln!(out, "- {NOT_PROVIDED}");
    } else {
        for kpi in kpis {
            let _ = writeln!(out, "- {kpi}");
        }
    }
    out.push('\n');
    labelled(&mut out, "Pilot duration", &record.pilot_duration);
    labelled(&mut out, "Evaluation method", &record.evaluation_method);

    out.push_str("## 7. Recommendation\n\n");
    labelled(&mut out, "Recommendation", &record.recommendation);
    labelled(&mut out, "Rationale", &record.rationale);
    labelled(&mut out, "Next steps", &record.next_steps);

    out
}

/// Lowercase ASCII slug: letters and digits kept, every other run becomes one `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Download file name derived from the study title
pub fn export_file_name(record: &FormRecord) -> String {
    let slug = slugify(&record.use_case_name);
    if slug.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        format!("feasibility-study-{slug}.md")
    }
}

/// A rendered study ready to be saved or copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content: String,
}

impl ExportedDocument {
    pub fn from_record(record: &FormRecord) -> Self {
        Self {
            file_name: export_file_name(record),
            content: render_markdown(record),
        }
    }

    /// Write the document into `dir` and return the full path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.content.as_bytes())?;
        tracing::info!(path = %path.display(), "exported feasibility study");
        Ok(path)
    }
}
