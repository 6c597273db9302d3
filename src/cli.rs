use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::record::Field;
use crate::roi::RoiInputs;
use crate::types::Severity;

/// Playbook - feasibility studies and ROI estimates for automation use cases
#[derive(Parser, Debug)]
#[command(name = "playbook")]
#[command(about = "Build feasibility studies step by step and estimate automation ROI")]
#[command(version)]
pub struct Cli {
    /// Configuration file (JSON). Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding draft files (overrides the configuration file)
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the feasibility study templates
    Templates,
    /// Work on the feasibility study draft
    Study {
        #[command(subcommand)]
        command: StudyCommands,
    },
    /// Estimate the return on investment of an automation
    Roi(RoiArgs),
}

#[derive(Subcommand, Debug)]
pub enum StudyCommands {
    /// Show the wizard position, template and list fields of the draft
    Status,
    /// Print the study as markdown
    Render,
    /// Apply a template, or clear back to defaults when no id is given
    Template {
        /// Template id (see `playbook templates`)
        id: Option<String>,
    },
    /// Set a field; list fields take one value per item, text fields join values with spaces
    Set {
        /// Field name, e.g. useCaseName, painPoints, tools
        field: Field,
        /// New value
        #[arg(num_args = 0..)]
        values: Vec<String>,
    },
    /// Jump to a wizard step (1-based)
    Step {
        number: usize,
    },
    /// Advance to the next wizard step
    Next,
    /// Go back one wizard step
    Back,
    /// Manage the risk table
    Risk {
        #[command(subcommand)]
        command: RiskCommands,
    },
    /// Manage the list of key performance indicators
    Kpi {
        #[command(subcommand)]
        command: KpiCommands,
    },
    /// Write the study as a markdown file
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete the draft and start from a blank study
    Discard,
    /// Delete the draft and start a new study with organization defaults
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct RiskFields {
    /// What could go wrong
    #[arg(short, long)]
    pub description: Option<String>,
    /// How the risk is reduced
    #[arg(short, long)]
    pub mitigation: Option<String>,
    /// low, medium or high
    #[arg(short, long)]
    pub severity: Option<Severity>,
}

#[derive(Subcommand, Debug)]
pub enum RiskCommands {
    /// Add a custom risk
    Add(RiskFields),
    /// Remove a custom risk (1-based position)
    Remove { number: usize },
    /// Edit a risk (1-based position)
    Update {
        number: usize,
        #[command(flatten)]
        fields: RiskFields,
    },
}

#[derive(Subcommand, Debug)]
pub enum KpiCommands {
    /// Add a KPI
    Add { text: Option<String> },
    /// Remove a KPI (1-based position)
    Remove { number: usize },
    /// Replace a KPI (1-based position)
    Update { number: usize, text: String },
}

#[derive(Args, Debug)]
pub struct RoiArgs {
    /// Hours one person spends on the task each week
    #[arg(long, default_value_t = 5.0)]
    pub hours_per_week: f64,
    /// Number of people doing the task
    #[arg(long, default_value_t = 10)]
    pub people: u32,
    /// Fully loaded cost of one hour of work
    #[arg(long, default_value_t = 50.0)]
    pub hourly_cost: f64,
    /// Expected share of task time saved, 0-100
    #[arg(long, default_value_t = 30.0)]
    pub time_saved_percent: f64,
    /// Tool cost per user per month
    #[arg(long, default_value_t = 30.0)]
    pub monthly_tool_cost: f64,
    /// One-time implementation cost
    #[arg(long, default_value_t = 0.0)]
    pub implementation_cost: f64,
    /// Print JSON instead of a markdown table
    #[arg(long)]
    pub json: bool,
}

impl From<&RoiArgs> for RoiInputs {
    fn from(args: &RoiArgs) -> Self {
        Self {
            hours_per_week: args.hours_per_week,
            people: args.people,
            hourly_cost: args.hourly_cost,
            time_saved_percent: args.time_saved_percent,
            monthly_tool_cost_per_user: args.monthly_tool_cost,
            implementation_cost: args.implementation_cost,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
