//! # SLA Subcommand
//!
//! - `report`: evaluate every active case against its SLA policy.
//! - `policies`: print the policy table in effect.
//! - `load`: per-assignee workload.
//! - `assign`: suggest an assignee for a new case.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use sgm_core::{Case, CasePriority, Timestamp};
use sgm_sla::{
    distinct_assignees, rank_by_urgency, AssigneeLoad, AssignmentSuggestion, EvaluatedCase,
    PolicyTable, SlaOverview,
};

use crate::config::SgmConfig;
use crate::{records_or_provider, resolve_now, to_pretty_json};

/// Arguments for the `sgm sla` subcommand.
#[derive(Args, Debug)]
pub struct SlaArgs {
    #[command(subcommand)]
    pub command: SlaCommand,
}

#[derive(Subcommand, Debug)]
pub enum SlaCommand {
    /// Evaluate active cases, most urgent first.
    Report {
        /// JSON array of cases. Defaults to the case provider.
        #[arg(long)]
        cases: Option<PathBuf>,
        /// YAML or JSON policy table. Defaults to the configured table.
        #[arg(long)]
        policies: Option<PathBuf>,
        /// Evaluation time (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<Timestamp>,
        #[arg(long)]
        json: bool,
    },

    /// Print the SLA policy table.
    Policies {
        #[arg(long)]
        policies: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Show workload per assignee.
    Load {
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Only this assignee. Defaults to every assignee with cases.
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        now: Option<Timestamp>,
        #[arg(long)]
        json: bool,
    },

    /// Suggest who should take a new case.
    Assign {
        /// Priority of the new case (low, medium, high, urgent).
        #[arg(long)]
        priority: CasePriority,
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Candidate assignee. Repeatable. Defaults to every current assignee.
        #[arg(long = "candidate")]
        candidates: Vec<String>,
        #[arg(long)]
        now: Option<Timestamp>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run_sla(args: &SlaArgs, config: &SgmConfig) -> Result<u8> {
    match &args.command {
        SlaCommand::Report {
            cases,
            policies,
            now,
            json,
        } => {
            let calculator = config.calculator(policies.as_deref())?;
            let cases = load_cases(cases.as_deref(), config)?;
            let mut evaluated = calculator.evaluate_active(&cases, resolve_now(*now));
            rank_by_urgency(&mut evaluated);
            let overview = SlaOverview::from_evaluations(&evaluated);
            if *json {
                println!("{}", to_pretty_json(&Report { overview, cases: &evaluated })?);
            } else {
                print!("{}", format_report(&overview, &evaluated));
            }
            Ok(0)
        }

        SlaCommand::Policies { policies, json } => {
            let calculator = config.calculator(policies.as_deref())?;
            if *json {
                println!("{}", to_pretty_json(calculator.policies().policies())?);
            } else {
                print!("{}", format_policies(calculator.policies()));
            }
            Ok(0)
        }

        SlaCommand::Load {
            cases,
            assignee,
            now,
            json,
        } => {
            let calculator = config.calculator(None)?;
            let cases = load_cases(cases.as_deref(), config)?;
            let names = match assignee {
                Some(name) => vec![name.clone()],
                None => distinct_assignees(&cases),
            };
            let loads = calculator.assignee_loads(&cases, &names, resolve_now(*now));
            if *json {
                println!("{}", to_pretty_json(&loads)?);
            } else {
                print!("{}", format_loads(&loads));
            }
            Ok(0)
        }

        SlaCommand::Assign {
            priority,
            cases,
            candidates,
            now,
            json,
        } => {
            let calculator = config.calculator(None)?;
            let cases = load_cases(cases.as_deref(), config)?;
            let pool = if candidates.is_empty() {
                distinct_assignees(&cases)
            } else {
                candidates.clone()
            };
            match calculator.suggest_optimal_assignment(&cases, &pool, *priority, resolve_now(*now))
            {
                Some(suggestion) => {
                    if *json {
                        println!("{}", to_pretty_json(&suggestion)?);
                    } else {
                        print!("{}", format_suggestion(&suggestion));
                    }
                    Ok(0)
                }
                None => {
                    println!("No assignee available: the candidate pool is empty.");
                    Ok(1)
                }
            }
        }
    }
}

fn load_cases(path: Option<&Path>, config: &SgmConfig) -> Result<Vec<Case>> {
    records_or_provider(path, || Ok(config.providers()?.cases))
}

#[derive(Serialize)]
struct Report<'a> {
    overview: SlaOverview,
    cases: &'a [EvaluatedCase],
}

pub fn format_report(overview: &SlaOverview, evaluated: &[EvaluatedCase]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SLA overview: {} active, {} on track, {} at risk, {} breached ({}% compliant, {} to escalate)",
        overview.total,
        overview.on_track,
        overview.at_risk,
        overview.breached,
        overview.compliance_rate,
        overview.should_escalate
    );
    if evaluated.is_empty() {
        return out;
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<16} {:<18} {:<8} {:>7} {:>6} {:>5}  {:<9} ASSIGNEE",
        "CASE", "TYPE", "PRIORITY", "ELAPSED", "TARGET", "PCT", "STATUS"
    );
    for entry in evaluated {
        let sla = &entry.sla;
        let _ = writeln!(
            out,
            "{:<16} {:<18} {:<8} {:>6}d {:>5}d {:>4.0}%  {:<9} {}",
            entry.case.case_number,
            entry.case.case_type.as_str(),
            entry.case.priority.as_str(),
            sla.days_elapsed,
            sla.policy.target_resolution_days,
            sla.percent_elapsed,
            sla.status.as_str(),
            entry.case.assigned_to.as_deref().unwrap_or("-"),
        );
    }
    out
}

pub fn format_policies(table: &PolicyTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:<8} {:>6} {:>7} {:>9}  DESCRIPTION",
        "TYPE", "PRIORITY", "TARGET", "WARNING", "ESCALATE"
    );
    for p in table.policies() {
        let _ = writeln!(
            out,
            "{:<18} {:<8} {:>5}d {:>6}% {:>8}%  {}",
            p.case_type.as_str(),
            p.priority.as_str(),
            p.target_resolution_days,
            p.warning_threshold_percent,
            p.escalation_threshold_percent,
            p.description
        );
    }
    let fallback = table.fallback();
    let _ = writeln!(
        out,
        "\nUnmatched cases use {} ({} days, escalate at {}%).",
        fallback.id, fallback.target_resolution_days, fallback.escalation_threshold_percent
    );
    out
}

pub fn format_loads(loads: &[AssigneeLoad]) -> String {
    if loads.is_empty() {
        return "No assignees.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<40} {:>6} {:>6} {:>4} {:>7} {:>8} {:>8} {:>8}  WORKLOAD",
        "ASSIGNEE", "ACTIVE", "URGENT", "HIGH", "AT RISK", "BREACHED", "AVG DAYS", "CAPACITY"
    );
    for load in loads {
        let _ = writeln!(
            out,
            "{:<40} {:>6} {:>6} {:>4} {:>7} {:>8} {:>8.1} {:>7}%  {}",
            load.assignee_name,
            load.active_cases,
            load.urgent_cases,
            load.high_priority_cases,
            load.at_risk_cases,
            load.breached_cases,
            load.avg_resolution_days,
            load.capacity,
            load.workload
        );
    }
    out
}

pub fn format_suggestion(suggestion: &AssignmentSuggestion) -> String {
    format!(
        "Suggested assignee: {}\nConfidence: {}%\nProjected capacity: {}%\nReason: {}\n",
        suggestion.assignee, suggestion.confidence, suggestion.projected_capacity, suggestion.reason
    )
}
