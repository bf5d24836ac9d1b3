//! Terminal rendering for the CLI
//!
//! Renders reports, health summaries and the criteria table as colored text.
//! Render functions return `String` so they can be tested; `print_*` wrappers write
//! to stdout.

use crate::config::Config;
use crate::criteria::{CriteriaDefinition, SeverityLevel};
use crate::diagnosis::{ConfidenceTier, Priority};
use crate::pipeline::{HealthReport, OverallStatus};
use crate::report::AssessmentReport;
use crate::services::ProbeResult;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::time::Duration;

const WIDTH: usize = 64;

fn rule() -> String {
    "=".repeat(WIDTH).cyan().to_string()
}

fn severity_label(level: SeverityLevel) -> ColoredString {
    let text = level.as_str().to_uppercase();
    match level {
        SeverityLevel::Subthreshold => text.green(),
        SeverityLevel::Mild => text.yellow(),
        SeverityLevel::Moderate => text.bright_red(),
        SeverityLevel::Severe => text.red().bold(),
    }
}

fn confidence_label(tier: ConfidenceTier) -> ColoredString {
    match tier {
        ConfidenceTier::High => tier.as_str().green(),
        ConfidenceTier::Moderate => tier.as_str().yellow(),
        ConfidenceTier::Low => tier.as_str().dimmed(),
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    let text = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::Critical => text.red().bold(),
        Priority::High => text.bright_red(),
        Priority::Moderate => text.yellow(),
        Priority::General => text.cyan(),
    }
}

/// Spinner shown while a collaborator call is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Render an assessment report
pub fn render_report(report: &AssessmentReport) -> String {
    let mut out = String::new();
    let d = &report.diagnosis;
    let s = &report.severity;

    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "{}", format!("  {} ({})", d.condition, d.code).bold().cyan());
    let _ = writeln!(out, "{}", format!("  Request {}", report.request_id).dimmed());
    let _ = writeln!(out, "{}\n", rule());

    let verdict = if d.meets_threshold {
        "Criteria met".red().bold()
    } else {
        "Criteria not met".green().bold()
    };
    let _ = writeln!(out, "  {}  (confidence: {})", verdict, confidence_label(d.confidence));
    let _ = writeln!(
        out,
        "  Symptoms: {}/{} detected, {} required",
        d.criteria_met_count,
        report.symptoms.len(),
        d.required_count
    );
    let core = if d.has_core_symptom {
        d.core_codes_detected.join(", ")
    } else {
        "none".to_string()
    };
    let _ = writeln!(out, "  Core symptoms: {}", core);
    let duration = if d.duration.specified {
        format!(
            "{} days ({} required{})",
            d.duration.days,
            d.duration.required,
            if d.duration.meets_requirement { ", met" } else { ", not met" }
        )
    } else {
        "not specified".to_string()
    };
    let _ = writeln!(out, "  Duration: {}", duration);
    let _ = writeln!(
        out,
        "  Severity: {} (score {}, range {})",
        severity_label(s.level),
        s.score,
        s.score_range
    );
    if s.escalated() {
        let _ = writeln!(
            out,
            "{}",
            format!("    raised from {} by severe functional impairment", s.base_level).dimmed()
        );
    }
    if s.functional_impairment {
        let _ = writeln!(
            out,
            "  Functional impairment: {} ({})",
            s.impairment_severity,
            s.impairment_details.join(", ")
        );
    }

    if d.crisis_detected {
        let _ = writeln!(out, "\n  {}", "CRISIS INDICATORS DETECTED".red().bold().underline());
    }

    let _ = writeln!(out, "\n{}", "Detected criteria".bold());
    let mut any = false;
    for symptom in report.detected_symptoms() {
        any = true;
        let _ = writeln!(
            out,
            "  {} {} {}",
            symptom.dsm5_code.yellow(),
            symptom.name,
            format!("({:.0}%)", symptom.confidence * 100.0).dimmed()
        );
        if let Some(phrase) = symptom.evidence.first() {
            let _ = writeln!(out, "      {}", format!("\"{}\"", phrase).dimmed());
        }
    }
    if !any {
        let _ = writeln!(out, "  {}", "none".dimmed());
    }

    let _ = writeln!(out, "\n{}", "Recommendations".bold());
    for rec in &report.recommendations {
        let _ = writeln!(out, "  {} {}", priority_label(rec.priority), rec.message);
        let extras = rec
            .resources
            .iter()
            .chain(rec.next_steps.iter())
            .chain(rec.suggestions.iter())
            .flatten();
        for line in extras {
            let _ = writeln!(out, "      - {}", line);
        }
    }

    let narrative = &report.ai_assessment.assessment.clinical_narrative;
    if !narrative.is_empty() {
        let _ = writeln!(out, "\n{}", "Clinical assessment".bold());
        let _ = writeln!(out, "  {}", narrative);
    }

    let _ = writeln!(out, "\n{}", report.disclaimer.dimmed());
    let _ = writeln!(
        out,
        "{}",
        format!("Processed in {}ms", report.metadata.total_ms).dimmed()
    );
    out
}

fn probe_line(name: &str, probe: &ProbeResult) -> String {
    if probe.is_healthy() {
        format!("  {} {}", "✓".green(), name)
    } else {
        format!(
            "  {} {} {}",
            "✗".red(),
            name,
            probe.error.as_deref().unwrap_or("unhealthy").dimmed()
        )
    }
}

/// Render a health report
pub fn render_health(report: &HealthReport) -> String {
    let status = match report.status {
        OverallStatus::Healthy => report.status.as_str().green().bold(),
        OverallStatus::Degraded => report.status.as_str().yellow().bold(),
        OverallStatus::Unhealthy => report.status.as_str().red().bold(),
    };
    let mut out = String::new();
    let _ = writeln!(out, "Status: {} ({}ms)", status, report.response_time_ms);
    let _ = writeln!(out, "{}", probe_line("symptom extractor", &report.extractor));
    let _ = writeln!(out, "{}", probe_line("narrative assessor", &report.assessor));
    out
}

/// Render the criteria table
pub fn render_criteria(criteria: &CriteriaDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("{} ({})", criteria.name, criteria.code).bold().cyan());
    let _ = writeln!(
        out,
        "Requires {} of {} criteria for at least {} days, including one of {}\n",
        criteria.required_symptom_count,
        criteria.len(),
        criteria.required_duration_days,
        criteria.core_codes.join(" / ")
    );

    for criterion in criteria.criteria {
        let mut tags = Vec::new();
        if criteria.is_core(criterion.code) {
            tags.push("core".cyan().to_string());
        }
        if criterion.crisis {
            tags.push("crisis".red().to_string());
        }
        let _ = writeln!(
            out,
            "  {:<3} {:<18} {} {}",
            criterion.code.yellow(),
            criterion.symptom_id,
            criterion.name,
            tags.join(" ")
        );
    }

    let _ = writeln!(out, "\n{}", "Severity bands".bold());
    for band in criteria.severity_bands {
        let _ = writeln!(out, "  {:<13} {:<5} {}", band.level.as_str(), band.range_label(), band.description.dimmed());
    }

    let _ = writeln!(out, "\n{}", "Exclusion criteria".bold());
    for exclusion in criteria.exclusion_criteria {
        let _ = writeln!(out, "  - {}", exclusion);
    }
    out
}

/// Render the resolved configuration
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Configuration".bold());
    let _ = writeln!(out, "  server      {}  (cors: {})", config.bind_addr(), config.server.cors_origin);
    let _ = writeln!(out, "  extractor   {}  ({}ms)", config.extractor.url, config.extractor.timeout_ms);
    let _ = writeln!(out, "  assessor    {}  ({}ms)", config.assessor.url, config.assessor.timeout_ms);
    let _ = writeln!(out, "  log level   {}", config.logging.level);
    out
}

pub fn print_report(report: &AssessmentReport) {
    print!("{}", render_report(report));
}

pub fn print_health(report: &HealthReport) {
    print!("{}", render_health(report));
}

pub fn print_criteria(criteria: &CriteriaDefinition) {
    print!("{}", render_criteria(criteria));
}

pub fn print_config(config: &Config) {
    print!("{}", render_config(config));
}

/// Error line for the CLI
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
