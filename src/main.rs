//! HealthBuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use healthbuddy::{
    bmi::{assess, classify, exercise_plan, BmiValue, BodyMetrics},
    cli::{Args, Commands, Config, HistoryCommand, ProfileCommand, Verbosity},
    display::{self, Reporter},
    history::{History, HistoryEntry, HistoryFilter},
    profile::{Disease, JsonProfileStore, ProfileStore, UserProfile},
    supplements::{parse_verdict, recognition_result, Supplement, SuitabilityRequest, SuitabilityVerdict},
    HealthError,
};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;

    let configured = Verbosity::from_config(&config.display.default_verbosity)
        .unwrap_or(Verbosity::Normal);
    let reporter = Reporter::new(args.verbosity_or(configured), config.display.color_output);

    let uid = args
        .user
        .clone()
        .unwrap_or_else(|| config.profile.default_uid.clone());
    reporter.trace(&format!("user={} verbosity={}", uid, reporter.verbosity().as_str()));

    let ctx = Ctx {
        args,
        config: &config,
        reporter,
        uid,
    };

    match &args.command {
        Commands::Bmi { weight, height, save } => ctx.bmi(*weight, *height, *save),
        Commands::Classify { bmi } => ctx.classify(bmi),
        Commands::Recommend { bmi } => ctx.recommend(bmi.as_deref()),
        Commands::Exercises { bmi } => ctx.exercises(bmi.as_deref()),
        Commands::Profile { action } => match action {
            ProfileCommand::Show => ctx.profile_show(),
            ProfileCommand::Set {
                weight,
                height,
                age,
                gender,
                activity,
                diseases,
            } => ctx.profile_set(ProfileUpdate {
                weight: *weight,
                height: *height,
                age: *age,
                gender: gender.as_deref(),
                activity: activity.as_deref(),
                diseases,
            }),
        },
        Commands::Screen {
            supplement,
            image,
            record,
        } => ctx.screen(supplement, image.clone(), *record),
        Commands::Verdict { reply, supplement } => ctx.verdict(reply, supplement.as_deref()),
        Commands::History { action } => match action {
            HistoryCommand::List { search, date } => ctx.history_list(HistoryFilter {
                search: search.clone(),
                date: *date,
            }),
            HistoryCommand::Clear => ctx.history_clear(),
        },
        Commands::Config => ctx.show_config(),
    }
}

/// Shared state for one invocation
struct Ctx<'a> {
    args: &'a Args,
    config: &'a Config,
    reporter: Reporter,
    uid: String,
}

struct ProfileUpdate<'a> {
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<f64>,
    gender: Option<&'a str>,
    activity: Option<&'a str>,
    diseases: &'a [String],
}

impl Ctx<'_> {
    fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        self.reporter.result(&json);
        Ok(())
    }

    fn profile_store(&self) -> Result<JsonProfileStore> {
        let dir = self.config.profile_dir();
        self.reporter.trace(&format!("profile dir: {}", dir.display()));
        JsonProfileStore::new(dir).context("Failed to open profile store")
    }

    /// Stored profile, or a blank one when none exists yet
    fn load_profile(&self, store: &JsonProfileStore) -> Result<UserProfile> {
        match store.load(&self.uid) {
            Ok(profile) => Ok(profile),
            Err(HealthError::ProfileNotFound { .. }) => {
                self.reporter
                    .detail(&format!("No profile for {}, starting from an empty one", self.uid));
                Ok(UserProfile::new(self.uid.clone()))
            }
            Err(e) => Err(e).context("Failed to load profile"),
        }
    }

    /// BMI from the argument, or from the stored profile when omitted
    fn resolve_bmi(&self, arg: Option<&str>) -> Result<BmiValue> {
        match arg {
            Some(text) => Ok(BmiValue::from_text(text)),
            None => {
                let store = self.profile_store()?;
                let profile = self.load_profile(&store)?;
                self.reporter
                    .detail(&format!("Using BMI {} from profile {}", profile.bmi, profile.uid));
                Ok(profile.bmi)
            }
        }
    }

    fn history_path(&self) -> std::path::PathBuf {
        let path = self.config.history_file();
        self.reporter.trace(&format!("history file: {}", path.display()));
        path
    }

    fn bmi(&self, weight: f64, height: f64, save: bool) -> Result<()> {
        let metrics = BodyMetrics::new(weight, height);
        let bmi = metrics.bmi();
        if !bmi.is_known() {
            self.reporter
                .warning("Weight and height must both be positive to compute a BMI");
        }

        let assessment = assess(bmi);
        if self.args.json {
            self.print_json(&assessment)?;
        } else {
            self.reporter.result(&display::render_assessment(&assessment));
        }

        if save {
            let mut store = self.profile_store()?;
            let mut profile = self.load_profile(&store)?;
            profile.set_measurements(metrics.weight, metrics.height);
            store.save(&profile).context("Failed to save profile")?;
            self.reporter
                .success(&format!("Saved measurements to profile {}", profile.uid));
        }

        Ok(())
    }

    fn classify(&self, text: &str) -> Result<()> {
        let bmi = BmiValue::from_text(text);
        let category = classify(bmi);
        self.reporter
            .trace(&format!("{:?} -> {:?}", bmi, category));

        if self.args.json {
            self.print_json(&serde_json::json!({
                "category": category,
                "colorTier": category.tier(),
            }))
        } else {
            self.reporter
                .result(&format!("{} ({})", category.label(), category.tier().label()));
            Ok(())
        }
    }

    fn recommend(&self, arg: Option<&str>) -> Result<()> {
        let assessment = assess(self.resolve_bmi(arg)?);
        if self.args.json {
            self.print_json(&assessment)
        } else {
            self.reporter.result(&display::render_assessment(&assessment));
            Ok(())
        }
    }

    fn exercises(&self, arg: Option<&str>) -> Result<()> {
        let plan = exercise_plan(self.resolve_bmi(arg)?);
        if self.args.json {
            self.print_json(plan)
        } else {
            let detailed = self.reporter.verbosity().show_events();
            self.reporter.result(&display::render_plan(plan, detailed));
            Ok(())
        }
    }

    fn profile_show(&self) -> Result<()> {
        let store = self.profile_store()?;
        let profile = match store.load(&self.uid) {
            Ok(profile) => profile,
            Err(HealthError::ProfileNotFound { uid }) => {
                self.reporter.warning(&format!(
                    "No profile for {} yet. Create one with `healthbuddy profile set`.",
                    uid
                ));
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to load profile"),
        };

        if self.args.json {
            return self.print_json(&profile);
        }

        self.reporter.result(&display::render_profile(&profile));
        self.reporter
            .result(&display::render_assessment(&profile.assessment()));
        Ok(())
    }

    fn profile_set(&self, update: ProfileUpdate<'_>) -> Result<()> {
        let mut store = self.profile_store()?;
        let mut profile = self.load_profile(&store)?;

        if update.weight.is_some() || update.height.is_some() {
            profile.set_measurements(
                update.weight.or(profile.weight),
                update.height.or(profile.height),
            );
        }
        if let Some(age) = update.age {
            profile.age = Some(age);
        }
        if let Some(gender) = update.gender {
            profile.gender = gender.parse()?;
        }
        if let Some(activity) = update.activity {
            profile.activity_level = activity.parse()?;
        }
        if !update.diseases.is_empty() {
            profile.diseases = update
                .diseases
                .iter()
                .map(|d| d.parse::<Disease>())
                .collect::<healthbuddy::Result<Vec<_>>>()?;
        }

        store.save(&profile).context("Failed to save profile")?;
        self.reporter
            .success(&format!("Profile {} saved (BMI {})", profile.uid, profile.bmi));
        Ok(())
    }

    fn screen(&self, label: &str, image: Option<String>, record: bool) -> Result<()> {
        let supplement: Supplement = label.parse()?;
        let store = self.profile_store()?;
        let profile = self.load_profile(&store)?;

        let recognition = recognition_result(supplement, &profile.diseases);
        if self.reporter.verbosity().show_trace() {
            let request = SuitabilityRequest::new(&profile, recognition.clone());
            self.reporter.trace(&serde_json::to_string(&request)?);
        }

        if self.args.json {
            self.print_json(&recognition)?;
        } else {
            for assessment in &recognition.supplements {
                self.reporter.result(&display::render_screening(assessment));
            }
        }

        if record {
            self.append_history(HistoryEntry::new(&recognition, image, None))?;
        }
        Ok(())
    }

    fn verdict(&self, reply_path: &Path, supplement: Option<&str>) -> Result<()> {
        let reply = if reply_path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read reply from stdin")?;
            buf
        } else {
            std::fs::read_to_string(reply_path)
                .with_context(|| format!("Failed to read {}", reply_path.display()))?
        };

        let verdict = match parse_verdict(&reply) {
            Ok(verdict) => verdict,
            Err(e) => {
                self.reporter.warning(&format!("{}; using fallback verdict", e));
                SuitabilityVerdict::fallback()
            }
        };

        if self.args.json {
            self.print_json(&verdict)?;
        } else {
            self.reporter.result(&display::render_verdict(&verdict));
        }

        if let Some(label) = supplement {
            let supplement: Supplement = label.parse()?;
            let store = self.profile_store()?;
            let profile = self.load_profile(&store)?;
            let recognition = recognition_result(supplement, &profile.diseases);
            self.append_history(HistoryEntry::new(&recognition, None, Some(verdict)))?;
        }
        Ok(())
    }

    fn append_history(&self, entry: HistoryEntry) -> Result<()> {
        let path = self.history_path();
        let mut history = History::load(&path)?;
        history.record(entry);
        history.save(&path)?;
        self.reporter
            .success(&format!("Recorded in history ({} entries)", history.len()));
        Ok(())
    }

    fn history_list(&self, filter: HistoryFilter) -> Result<()> {
        let history = History::load(&self.history_path())?;
        let entries: Vec<&HistoryEntry> = history.filter(&filter).collect();

        if self.args.json {
            return self.print_json(&entries);
        }

        if entries.is_empty() {
            self.reporter.info("No history entries");
            return Ok(());
        }
        for entry in &entries {
            self.reporter.result(&display::render_history_entry(entry));
        }
        if !filter.is_empty() {
            self.reporter.info(&format!(
                "{} of {} entries match",
                entries.len(),
                history.len()
            ));
        }
        Ok(())
    }

    fn history_clear(&self) -> Result<()> {
        let path = self.history_path();
        let mut history = History::load(&path)?;
        let removed = history.len();
        history.clear();
        history.save(&path)?;
        self.reporter
            .success(&format!("Removed {} history entries", removed));
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        if let Some(path) = Config::default_path() {
            self.reporter.detail(&format!("Default location: {}", path.display()));
        }
        let toml = toml::to_string_pretty(self.config).context("Failed to serialize config")?;
        self.reporter.result(&toml);
        Ok(())
    }
}
