//! Playbook - main entry point
//!
//! Each `study` invocation resumes the stored draft, applies one change and
//! flushes the autosave before exiting.

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use playbook::cli::{Cli, Commands, KpiCommands, RiskCommands, RiskFields, StudyCommands};
use playbook::record::{FieldKind, FieldValue, RiskUpdate};
use playbook::roi::RoiInputs;
use playbook::{FileStore, PlaybookConfig, SystemClock, WizardController, WizardStep, templates};

/// Initialize logging; `RUST_LOG` overrides the default level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let mut config = PlaybookConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Templates => {
            for template in templates::all() {
                println!("{:<20} {}", template.id, template.name);
                println!("{:<20} {}", "", template.summary);
            }
        }
        Commands::Roi(args) => {
            let result = RoiInputs::from(&args).calculate()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", result.to_markdown());
            }
        }
        Commands::Study { command } => run_study_command(&config, command)?,
    }

    Ok(())
}

fn open_study(config: &PlaybookConfig) -> WizardController {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let store = FileStore::new(&config.storage_dir);
    WizardController::new(
        Box::new(store),
        Box::new(SystemClock),
        config.wizard_settings(today),
    )
}

/// Convert a 1-based position from the command line
fn position(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .context("Positions start at 1")
}

fn risk_updates(fields: RiskFields) -> Vec<RiskUpdate> {
    let mut updates = Vec::new();
    if let Some(text) = fields.description {
        updates.push(RiskUpdate::Description(text));
    }
    if let Some(text) = fields.mitigation {
        updates.push(RiskUpdate::Mitigation(text));
    }
    if let Some(severity) = fields.severity {
        updates.push(RiskUpdate::Severity(severity));
    }
    updates
}

fn run_study_command(config: &PlaybookConfig, command: StudyCommands) -> Result<()> {
    let mut wizard = open_study(config);
    if wizard.initialize().is_some() {
        // The command line has no resume prompt; an existing draft is always continued
        wizard.resume_draft();
    }

    match command {
        StudyCommands::Status => print_status(&wizard),
        StudyCommands::Render => print!("{}", wizard.render()),
        StudyCommands::Template { id } => {
            wizard.select_template(id.as_deref())?;
            match wizard.selected_template() {
                Some(id) => println!("Applied template {id}"),
                None => println!("Cleared study back to defaults"),
            }
        }
        StudyCommands::Set { field, values } => {
            let value = match field.kind() {
                FieldKind::Text => FieldValue::Text(values.join(" ")),
                FieldKind::List => FieldValue::List(values),
            };
            wizard.update_field(field, value)?;
        }
        StudyCommands::Step { number } => {
            let step = wizard.go_to_step(position(number)?)?;
            println!("Step {}/{}: {}", step.index() + 1, WizardStep::TOTAL_STEPS, step);
        }
        StudyCommands::Next => {
            let step = wizard.next_step()?;
            println!("Step {}/{}: {}", step.index() + 1, WizardStep::TOTAL_STEPS, step);
        }
        StudyCommands::Back => {
            let step = wizard.previous_step()?;
            println!("Step {}/{}: {}", step.index() + 1, WizardStep::TOTAL_STEPS, step);
        }
        StudyCommands::Risk { command } => match command {
            RiskCommands::Add(fields) => {
                let index = wizard.add_risk()?;
                for update in risk_updates(fields) {
                    wizard.update_risk(index, update)?;
                }
                println!("Added risk {}", index + 1);
            }
            RiskCommands::Remove { number } => {
                wizard.remove_risk(position(number)?)?;
            }
            RiskCommands::Update { number, fields } => {
                let index = position(number)?;
                for update in risk_updates(fields) {
                    wizard.update_risk(index, update)?;
                }
            }
        },
        StudyCommands::Kpi { command } => match command {
            KpiCommands::Add { text } => {
                let index = wizard.add_kpi()?;
                if let Some(text) = text {
                    wizard.update_kpi(index, text)?;
                }
            }
            KpiCommands::Remove { number } => {
                wizard.remove_kpi(position(number)?)?;
            }
            KpiCommands::Update { number, text } => {
                wizard.update_kpi(position(number)?, text)?;
            }
        },
        StudyCommands::Export { out } => {
            let path = wizard.export_document().write_to(&out)?;
            println!("Wrote {}", path.display());
        }
        StudyCommands::Discard => {
            wizard.discard_draft();
            println!("Draft discarded");
        }
        StudyCommands::Reset => {
            wizard.reset_for_new_entry();
            println!("Started a new study");
        }
    }

    if wizard.flush() {
        info!("draft saved");
    }
    if !wizard.autosave_enabled() {
        eprintln!(
            "warning: the draft could not be saved; changes from this command were not kept"
        );
    }
    Ok(())
}

fn print_status(wizard: &WizardController) {
    let step = wizard.current_step();
    let record = wizard.record();

    println!("Step {}/{}: {}", step.index() + 1, WizardStep::TOTAL_STEPS, step);
    for candidate in WizardStep::all() {
        let marker = if *candidate == step {
            ">"
        } else if wizard.is_step_reachable(candidate.index()) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {}. {}", candidate.index() + 1, candidate);
    }
    println!("Template: {}", wizard.selected_template().unwrap_or("none"));
    match wizard.last_saved() {
        Some(saved) => println!("Last saved: {}", saved.to_rfc3339()),
        None => println!("Last saved: never"),
    }

    println!("Risks:");
    for (i, risk) in record.risks.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({})",
            i + 1,
            risk.category,
            if risk.description.trim().is_empty() { "-" } else { risk.description.as_str() },
            risk.severity
        );
    }
    println!("KPIs:");
    for (i, kpi) in record.kpis.iter().enumerate() {
        println!("  {}. {}", i + 1, kpi);
    }
}
