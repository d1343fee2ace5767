//! Designer model.
//!
//! Designers are the human resources tasks are assigned to. The roster
//! provider owns them; the engine treats them as read-only for a session.

use serde::{Deserialize, Serialize};

/// A designer eligible for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Designer {
    /// Opaque identifier (stable across sessions).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Services offered, with proficiency.
    pub services: Vec<Skill>,
    /// Working languages.
    pub languages: Vec<String>,
    /// Descriptions of past tasks.
    pub past_tasks: Vec<String>,
    /// Free-text profile.
    pub bio: String,
}

/// A service offered with proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Service name (e.g., "Logo Design", "Presentation").
    pub name: String,
    /// Catalogue id of the service, when the roster knows it.
    pub category_id: Option<String>,
    /// Proficiency level (0.0 to 1.0, where 1.0 = expert).
    pub level: f64,
}

impl Designer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            services: Vec::new(),
            languages: Vec::new(),
            past_tasks: Vec::new(),
            bio: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a service at the given proficiency.
    pub fn with_service(mut self, name: impl Into<String>, level: f64) -> Self {
        self.services.push(Skill::new(name, level));
        self
    }

    /// Adds a service the catalogue knows by id.
    pub fn with_catalogue_service(
        mut self,
        category_id: impl Into<String>,
        name: impl Into<String>,
        level: f64,
    ) -> Self {
        self.services
            .push(Skill::new(name, level).with_category_id(category_id));
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn with_past_task(mut self, description: impl Into<String>) -> Self {
        self.past_tasks.push(description.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether the designer carries any skill or attribute data.
    pub fn has_profile(&self) -> bool {
        !self.services.is_empty()
            || !self.languages.is_empty()
            || self.past_tasks.iter().any(|t| !t.trim().is_empty())
            || !self.bio.trim().is_empty()
    }

    /// Whether the designer speaks a language (case-insensitive).
    pub fn speaks(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l.trim().eq_ignore_ascii_case(language.trim()))
    }

    /// All free text in the profile, for keyword matching.
    pub fn profile_text(&self) -> String {
        let mut parts: Vec<&str> = self.services.iter().map(|s| s.name.as_str()).collect();
        parts.extend(self.past_tasks.iter().map(String::as_str));
        parts.push(&self.bio);
        parts.join(" ")
    }
}

impl Skill {
    pub fn new(name: impl Into<String>, level: f64) -> Self {
        Self {
            name: name.into(),
            category_id: None,
            level: if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) },
        }
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designer_builder() {
        let d = Designer::new("D1")
            .with_name("Ada")
            .with_service("Logo Design", 0.9)
            .with_catalogue_service("17", "Presentation", 0.6)
            .with_language("English")
            .with_past_task("Rebrand for a coffee roaster")
            .with_bio("Print and identity work");

        assert_eq!(d.id, "D1");
        assert_eq!(d.display_name(), "Ada");
        assert_eq!(d.services.len(), 2);
        assert_eq!(d.services[1].category_id.as_deref(), Some("17"));
        assert!(d.has_profile());
        assert!(d.speaks("english"));
        assert!(!d.speaks("German"));
        assert!(d.profile_text().contains("coffee roaster"));
    }

    #[test]
    fn test_skill_clamping() {
        let d = Designer::new("D1")
            .with_service("over", 1.5)
            .with_service("under", -0.5)
            .with_service("nan", f64::NAN);

        assert!((d.services[0].level - 1.0).abs() < 1e-10);
        assert!((d.services[1].level - 0.0).abs() < 1e-10);
        assert!((d.services[2].level - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_profile() {
        let d = Designer::new("D9").with_past_task("   ");
        assert!(!d.has_profile());
        assert_eq!(d.display_name(), "D9");
    }
}
