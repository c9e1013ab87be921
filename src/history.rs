//! Supplement analysis history with name and date search

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::errors::{HealthError, Result};
use crate::supplements::{
    NutrientMap, RecognitionResult, SafetyLevel, Supplement, SupplementAssessment,
    SuitabilityVerdict,
};

/// One completed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub supplement_name: Supplement,
    #[serde(default)]
    pub total_nutrients: NutrientMap,
    /// Per-supplement screening at the time of the analysis
    #[serde(default)]
    pub supplements: Vec<SupplementAssessment>,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub suitability: Option<SuitabilityVerdict>,
}

impl HistoryEntry {
    pub fn new(
        recognition: &RecognitionResult,
        image_name: Option<String>,
        suitability: Option<SuitabilityVerdict>,
    ) -> Self {
        Self::at(Utc::now(), recognition, image_name, suitability)
    }

    /// Entry with an explicit timestamp
    pub fn at(
        date: DateTime<Utc>,
        recognition: &RecognitionResult,
        image_name: Option<String>,
        suitability: Option<SuitabilityVerdict>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            supplement_name: recognition.supplement_name,
            total_nutrients: recognition.total_nutrients.clone(),
            supplements: recognition.supplements.clone(),
            image_name,
            suitability,
        }
    }

    /// Most severe screening outcome recorded with this entry
    pub fn worst_safety(&self) -> Option<SafetyLevel> {
        self.supplements.iter().map(|s| s.overall_safety).max()
    }
}

/// Search criteria; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the supplement name
    pub search: Option<String>,
    /// Calendar day (UTC) of the analysis
    pub date: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty) && self.date.is_none()
    }

    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                entry.supplement_name.name().to_lowercase().contains(&term)
                    || entry.supplement_name.label_ko().contains(&term)
            }
        };

        let matches_date = self
            .date
            .map_or(true, |day| entry.date.date_naive() == day);

        matches_search && matches_date
    }
}

/// Newest-first log of analyses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing file is an empty history
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path)
            .map_err(|e| HealthError::HistoryError(format!("Failed to read history: {}", e)))?;
        let mut history: History = serde_json::from_str(&json)
            .map_err(|e| HealthError::HistoryError(format!("Failed to parse history: {}", e)))?;
        history.entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HealthError::HistoryError(format!("Failed to create history dir: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| HealthError::HistoryError(format!("Failed to write history: {}", e)))?;
        Ok(())
    }

    /// Add an entry, keeping newest first
    pub fn record(&mut self, entry: HistoryEntry) {
        let pos = self
            .entries
            .iter()
            .position(|e| e.date <= entry.date)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn filter<'a>(&'a self, filter: &'a HistoryFilter) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
