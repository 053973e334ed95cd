//! # Plans Subcommand
//!
//! - `completion`: completion rollup for one plan or all plans.
//! - `complete`: mark a section complete and show the new rollup.
//!
//! Changes made by `complete` live only for the duration of the command.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use sgm_core::{PlanId, SectionId};
use sgm_plans::{Plan, PlanCompletionStats};
use sgm_store::{MemoryRepository, Repository};

use crate::config::SgmConfig;
use crate::{records_or_provider, to_pretty_json};

#[derive(Args, Debug)]
pub struct PlansArgs {
    #[command(subcommand)]
    pub command: PlansCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlansCommand {
    /// Show completion for one plan, or every plan.
    Completion {
        #[arg(long)]
        plan: Option<String>,
        /// JSON array of plans. Defaults to the plan provider.
        #[arg(long)]
        plans: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Mark a section complete.
    Complete {
        #[arg(long)]
        plan: String,
        #[arg(long)]
        section: String,
        #[arg(long)]
        plans: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run_plans(args: &PlansArgs, config: &SgmConfig) -> Result<u8> {
    match &args.command {
        PlansCommand::Completion { plan, plans, json } => {
            let repo = load_plans(plans.as_deref(), config)?;
            let stats = match plan {
                Some(id) => {
                    let id = PlanId::new(id.as_str());
                    let plan = repo
                        .find_by_id(&id)
                        .with_context(|| format!("plan not found: {id}"))?;
                    vec![(plan.plan_code.clone(), plan.completion())]
                }
                None => repo
                    .find_all()
                    .iter()
                    .map(|p| (p.plan_code.clone(), p.completion()))
                    .collect(),
            };
            if *json {
                let bare: Vec<_> = stats.iter().map(|(_, s)| s).collect();
                println!("{}", to_pretty_json(&bare)?);
            } else {
                print!("{}", format_completion(&stats));
            }
            Ok(0)
        }

        PlansCommand::Complete {
            plan,
            section,
            plans,
            json,
        } => {
            let repo = load_plans(plans.as_deref(), config)?;
            let plan_id = PlanId::new(plan.as_str());
            let stats = repo
                .try_update(&plan_id, |p| p.mark_section_complete(&SectionId::new(section.as_str())))
                .with_context(|| format!("plan not found: {plan_id}"))??;
            if *json {
                println!("{}", to_pretty_json(&stats)?);
            } else {
                print!("{}", format_completion(&[(plan.clone(), stats)]));
            }
            Ok(0)
        }
    }
}

fn load_plans(path: Option<&Path>, config: &SgmConfig) -> Result<MemoryRepository<Plan>> {
    let plans = records_or_provider(path, || Ok(config.providers()?.plans))?;
    Ok(MemoryRepository::seeded(plans))
}

pub fn format_completion(stats: &[(String, PlanCompletionStats)]) -> String {
    if stats.is_empty() {
        return "No plans.\n".to_string();
    }
    let mut out = String::new();
    for (code, s) in stats {
        let _ = writeln!(
            out,
            "{code} ({}): {}% complete, {}/{} sections, {}/{} required{}",
            s.plan_id,
            s.completion_percentage,
            s.sections_completed,
            s.sections_total,
            s.required_sections_completed,
            s.required_sections_total,
            if s.required_complete() { "" } else { " (required sections outstanding)" }
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_lines() {
        let stats = PlanCompletionStats {
            plan_id: PlanId::new("plan-001"),
            completion_percentage: 40,
            sections_completed: 2,
            sections_total: 5,
            required_sections_completed: 2,
            required_sections_total: 4,
        };
        let text = format_completion(&[("PLAN-FY26-AE".into(), stats)]);
        assert_eq!(
            text,
            "PLAN-FY26-AE (plan-001): 40% complete, 2/5 sections, 2/4 required (required sections outstanding)\n"
        );
    }

    #[test]
    fn no_plans() {
        assert_eq!(format_completion(&[]), "No plans.\n");
    }
}
