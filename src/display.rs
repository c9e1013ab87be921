//! Terminal output for the CLI
//!
//! Status lines are gated by `Verbosity` and colour-coded; result blocks are
//! rendered to strings first so they can be tested without a terminal.

use colored::*;

use crate::bmi::{BmiAssessment, ExercisePlan};
use crate::cli::Verbosity;
use crate::history::HistoryEntry;
use crate::profile::UserProfile;
use crate::supplements::{SafetyLevel, Suitability, SuitabilityVerdict, SupplementAssessment};

/// Verbosity-aware printer
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbosity: Verbosity,
}

impl Reporter {
    /// Create a reporter; `color = false` disables ANSI colours process-wide
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Final result; printed even in quiet mode
    pub fn result(&self, text: &str) {
        println!("{}", text);
    }

    pub fn info(&self, message: &str) {
        if self.verbosity.show_status() {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity.show_status() {
            println!("{} {}", "✓".green(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.verbosity.show_status() {
            println!("{} {}", "Warning:".yellow().bold(), message);
        }
    }

    /// Shown with -v
    pub fn detail(&self, message: &str) {
        if self.verbosity.show_events() {
            println!("{}", message.dimmed());
        }
    }

    /// Shown with -vv
    pub fn trace(&self, message: &str) {
        if self.verbosity.show_trace() {
            eprintln!("{} {}", "[trace]".dimmed(), message.dimmed());
        }
    }
}

pub fn render_assessment(assessment: &BmiAssessment) -> String {
    let tier = assessment.color_tier;
    let mut out = String::new();
    out.push_str(&format!(
        "BMI: {}  {} ({})\n",
        assessment.bmi.to_string().bold(),
        assessment.category.label().color(tier.color()).bold(),
        tier.label()
    ));
    out.push_str(&format!("  Exercise: {}\n", assessment.recommendation.exercise));
    out.push_str(&format!("  Diet:     {}\n", assessment.recommendation.diet));
    out.push_str(&format!(
        "  Warning:  {}",
        assessment.recommendation.warning.color(tier.color())
    ));
    out
}

pub fn render_plan(plan: &ExercisePlan, detailed: bool) -> String {
    let mut lines = vec![format!(
        "{} ({} exercises)",
        plan.title.bold().cyan(),
        plan.exercises.len()
    )];

    for (i, exercise) in plan.exercises.iter().enumerate() {
        lines.push(format!(
            "{}. {} - {} [{} | {} | {} kcal]",
            i + 1,
            exercise.name.bold(),
            exercise.description,
            exercise.duration,
            exercise.difficulty,
            exercise.calories
        ));
        if detailed {
            for step in exercise.instructions {
                lines.push(format!("     - {}", step));
            }
            lines.push(format!("     {}", exercise.video_url().dimmed()));
        }
    }

    lines.join("\n")
}

pub fn render_profile(profile: &UserProfile) -> String {
    let fmt_opt = |v: Option<f64>, unit: &str| match v {
        Some(v) => format!("{}{}", v, unit),
        None => "-".to_string(),
    };
    let conditions: Vec<String> = profile.conditions().map(|d| d.to_string()).collect();

    [
        format!("User:       {}", profile.uid.bold()),
        format!("Age:        {}", fmt_opt(profile.age, "")),
        format!("Gender:     {}", profile.gender),
        format!("Weight:     {}", fmt_opt(profile.weight, " kg")),
        format!("Height:     {}", fmt_opt(profile.height, " cm")),
        format!("Activity:   {}", profile.activity_level),
        format!(
            "Conditions: {}",
            if conditions.is_empty() { "none".to_string() } else { conditions.join(", ") }
        ),
    ]
    .join("\n")
}

fn safety_color(level: SafetyLevel) -> Color {
    match level {
        SafetyLevel::Safe => Color::Green,
        SafetyLevel::Caution => Color::Yellow,
        SafetyLevel::Danger => Color::Red,
    }
}

pub fn render_screening(assessment: &SupplementAssessment) -> String {
    let level = assessment.overall_safety;
    let mut lines = vec![format!(
        "{}: {}",
        assessment.name.to_string().bold(),
        level.to_string().to_uppercase().color(safety_color(level)).bold()
    )];
    for reason in &assessment.reasons {
        lines.push(format!("  - {}", reason));
    }
    let nutrients: Vec<String> = assessment
        .nutrients
        .iter()
        .map(|(name, amount)| format!("{}: {}", name, amount))
        .collect();
    lines.push(format!("  Nutrients: {}", nutrients.join(", ")));
    lines.join("\n")
}

pub fn render_verdict(verdict: &SuitabilityVerdict) -> String {
    let suitability = verdict.suitability();
    let color = match suitability {
        Suitability::Recommended => Color::Green,
        Suitability::NotRecommended => Color::Red,
        Suitability::Undetermined => Color::Yellow,
    };

    let mut lines = vec![
        format!(
            "{} ({}% confidence)",
            suitability.label().color(color).bold(),
            verdict.confidence_percent()
        ),
        format!("  {}", verdict.reasoning),
    ];
    if !verdict.precautions.is_empty() {
        lines.push("  Precautions:".to_string());
        lines.extend(verdict.precautions.iter().map(|p| format!("    - {}", p)));
    }
    if !verdict.alternatives.is_empty() {
        lines.push("  Alternatives:".to_string());
        lines.extend(verdict.alternatives.iter().map(|a| format!("    - {}", a)));
    }
    if let Some(dosage) = &verdict.dosage_recommendation {
        lines.push(format!("  Dosage: {}", dosage));
    }
    lines.join("\n")
}

pub fn render_history_entry(entry: &HistoryEntry) -> String {
    let safety = match entry.worst_safety() {
        Some(level) => level
            .to_string()
            .to_uppercase()
            .color(safety_color(level))
            .bold()
            .to_string(),
        None => "unscreened".dimmed().to_string(),
    };
    let verdict = entry
        .suitability
        .as_ref()
        .map(|v| format!("{} ({}%)", v.suitability().label(), v.confidence_percent()))
        .unwrap_or_else(|| "no verdict".to_string());

    let mut lines = vec![format!(
        "{}  {}  {}  {}{}",
        entry.date.format("%Y-%m-%d %H:%M"),
        entry.supplement_name.to_string().bold(),
        safety,
        verdict,
        entry
            .image_name
            .as_ref()
            .map(|name| format!("  [{}]", name))
            .unwrap_or_default()
    )];
    for assessment in &entry.supplements {
        lines.extend(assessment.reasons.iter().map(|r| format!("    - {}", r)));
    }
    lines.join("\n")
}
