//! Task models.
//!
//! A `TaskRecord` is what the task source hands over (the raw task from the
//! project backend). A `TaskRequirement` is what the engine schedules
//! against: text to match, a deadline, and a positive duration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EstimationConfig;
use crate::error::{EngineError, Result};

/// A task category label.
///
/// The backend sometimes knows a category only by free text, sometimes
/// by catalogue id and name. Both cases must be handled explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    /// Free-text label not yet resolved against the catalogue.
    Unresolved { text: String },
    /// Catalogue entry.
    Resolved { id: String, name: String },
}

impl Category {
    pub fn unresolved(text: impl Into<String>) -> Self {
        Self::Unresolved { text: text.into() }
    }

    pub fn resolved(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Resolved {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Unresolved { text } => text,
            Self::Resolved { name, .. } => name,
        }
    }
}

/// How much work a task declares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffortEstimate {
    /// Explicit hours.
    Hours(f64),
    /// A count of work units (pages, slides) at a configured rate.
    WorkUnits(u32),
    /// Nothing declared; use the configured default.
    Unspecified,
}

/// A task as supplied by the task source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub deadline: DateTime<Utc>,
    pub effort: EffortEstimate,
    /// Languages the deliverable must be produced in.
    pub languages: Vec<String>,
    /// Parent task in the project backend, kept for traceability.
    pub parent_task_id: Option<String>,
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            categories: Vec::new(),
            deadline,
            effort: EffortEstimate::Unspecified,
            languages: Vec::new(),
            parent_task_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_effort(mut self, effort: EffortEstimate) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn with_parent(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }
}

/// What the engine schedules against.
///
/// Constructed fresh per scheduling request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequirement {
    pub task_id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<Category>,
    pub languages: Vec<String>,
    pub deadline: DateTime<Utc>,
    /// Estimated effort in whole minutes (always > 0).
    pub duration_minutes: i64,
    pub parent_task_id: Option<String>,
}

impl TaskRequirement {
    /// Creates a requirement with an explicit duration.
    ///
    /// Fails if `duration` is not positive.
    pub fn new(
        task_id: impl Into<String>,
        deadline: DateTime<Utc>,
        duration: Duration,
    ) -> Result<Self> {
        let duration_minutes = duration.num_minutes();
        if duration_minutes <= 0 {
            return Err(EngineError::InvalidRequirement(format!(
                "duration must be at least one minute, got {}s",
                duration.num_seconds()
            )));
        }
        Ok(Self {
            task_id: task_id.into(),
            name: String::new(),
            description: String::new(),
            categories: Vec::new(),
            languages: Vec::new(),
            deadline,
            duration_minutes,
            parent_task_id: None,
        })
    }

    /// Derives a requirement from a task record, estimating duration
    /// when the record declares none.
    ///
    /// Resolution order: explicit hours, then work units times
    /// `hours_per_work_unit`, then `default_duration_hours`.
    pub fn from_record(record: &TaskRecord, estimation: &EstimationConfig) -> Result<Self> {
        let hours = match record.effort {
            EffortEstimate::Hours(h) => h,
            EffortEstimate::WorkUnits(units) => f64::from(units) * estimation.hours_per_work_unit,
            EffortEstimate::Unspecified => estimation.default_duration_hours,
        };
        if !hours.is_finite() || hours <= 0.0 {
            return Err(EngineError::InvalidRequirement(format!(
                "task '{}' has non-positive effort ({hours}h)",
                record.id
            )));
        }

        let duration = Duration::try_minutes((hours * 60.0).round() as i64).ok_or_else(|| {
            EngineError::InvalidRequirement(format!(
                "task '{}' has an effort of {hours}h, beyond the representable range",
                record.id
            ))
        })?;
        let mut requirement = Self::new(record.id.clone(), record.deadline, duration)?;
        requirement.name = record.name.clone();
        requirement.description = record.description.clone();
        requirement.categories = record.categories.clone();
        requirement.languages = record.languages.clone();
        requirement.parent_task_id = record.parent_task_id.clone();
        Ok(requirement)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn with_parent(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }

    /// Saturates at the largest representable duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::try_minutes(self.duration_minutes).unwrap_or(Duration::MAX)
    }

    /// Name, description, and category labels joined for text matching.
    pub fn requirement_text(&self) -> String {
        let mut parts = vec![self.name.as_str(), self.description.as_str()];
        parts.extend(self.categories.iter().map(Category::label));
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 6, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_requirement_rejects_zero_duration() {
        let err = TaskRequirement::new("T1", deadline(), Duration::seconds(30)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequirement(_)));
    }

    #[test]
    fn test_from_record_explicit_hours() {
        let record = TaskRecord::new("T1", deadline())
            .with_name("Annual report")
            .with_effort(EffortEstimate::Hours(2.5))
            .with_parent("P1");
        let req = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap();
        assert_eq!(req.duration(), Duration::minutes(150));
        assert_eq!(req.parent_task_id.as_deref(), Some("P1"));
        assert_eq!(req.name, "Annual report");
    }

    #[test]
    fn test_from_record_work_units() {
        let record =
            TaskRecord::new("T1", deadline()).with_effort(EffortEstimate::WorkUnits(12));
        let req = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap();
        assert_eq!(req.duration(), Duration::hours(6)); // 12 × 0.5h
    }

    #[test]
    fn test_from_record_default_duration() {
        let record = TaskRecord::new("T1", deadline());
        let req = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap();
        assert_eq!(req.duration(), Duration::hours(4));
    }

    #[test]
    fn test_from_record_zero_units_rejected() {
        let record = TaskRecord::new("T1", deadline()).with_effort(EffortEstimate::WorkUnits(0));
        let err = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequirement(_)));
    }

    #[test]
    fn test_from_record_out_of_range_effort_rejected() {
        let record = TaskRecord::new("T1", deadline()).with_effort(EffortEstimate::Hours(1e20));
        let err = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequirement(ref msg) if msg.contains("representable")));
    }

    #[test]
    fn test_from_record_huge_but_representable_effort() {
        let record = TaskRecord::new("T1", deadline()).with_effort(EffortEstimate::Hours(1e10));
        let req = TaskRequirement::from_record(&record, &EstimationConfig::default()).unwrap();
        assert_eq!(req.duration_minutes, 600_000_000_000);
    }

    #[test]
    fn test_requirement_text_includes_both_category_kinds() {
        let req = TaskRequirement::new("T1", deadline(), Duration::hours(1))
            .unwrap()
            .with_name("Flyer")
            .with_description("Spring campaign")
            .with_category(Category::resolved("4", "Print Design"))
            .with_category(Category::unresolved("social media"));
        assert_eq!(
            req.requirement_text(),
            "Flyer Spring campaign Print Design social media"
        );
    }

    #[test]
    fn test_category_serde_tagging() {
        let json = serde_json::to_string(&Category::resolved("4", "Print")).unwrap();
        assert_eq!(json, r#"{"kind":"resolved","id":"4","name":"Print"}"#);
        let back: Category = serde_json::from_str(r#"{"kind":"unresolved","text":"web"}"#).unwrap();
        assert_eq!(back, Category::unresolved("web"));
    }
}
