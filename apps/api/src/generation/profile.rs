//! The user's resume facts, either as a structured record or as raw form text.

use serde::{Deserialize, Serialize};

/// Flat record of resume facts. Item order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Raw form fields: the three collections are newline-separated text areas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub projects: String,
}

/// Either profile shape, as accepted on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileInput {
    Structured(Profile),
    Form(ProfileForm),
}

/// Splits a text area into trimmed, non-blank lines.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

impl Profile {
    /// Drops blank collection items and trims the rest, keeping order.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name,
            education: self.education,
            skills: clean_items(self.skills),
            experience: clean_items(self.experience),
            projects: clean_items(self.projects),
        }
    }
}

impl From<ProfileForm> for Profile {
    fn from(form: ProfileForm) -> Self {
        Self {
            name: form.name,
            education: form.education,
            skills: parse_lines(&form.skills),
            experience: parse_lines(&form.experience),
            projects: parse_lines(&form.projects),
        }
    }
}

impl From<ProfileInput> for Profile {
    fn from(input: ProfileInput) -> Self {
        match input {
            ProfileInput::Structured(profile) => profile.normalized(),
            ProfileInput::Form(form) => form.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_drops_blanks_and_trims() {
        let lines = parse_lines("  Python \n\nSQL\r\n   \nMachine Learning");
        assert_eq!(lines, vec!["Python", "SQL", "Machine Learning"]);
    }

    #[test]
    fn test_form_converts_to_profile() {
        let form = ProfileForm {
            name: "Alice Smith".to_string(),
            education: "MSc Data Science".to_string(),
            skills: "Python\nSQL\n".to_string(),
            experience: "".to_string(),
            projects: "Sentiment Analysis\n\nRecommender".to_string(),
        };
        let profile = Profile::from(form);

        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert!(profile.experience.is_empty());
        assert_eq!(profile.projects, vec!["Sentiment Analysis", "Recommender"]);
    }

    #[test]
    fn test_untagged_input_accepts_both_shapes() {
        let structured: ProfileInput = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "skills": ["Python", " ", "SQL"]
        }))
        .unwrap();
        let profile = Profile::from(structured);
        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert_eq!(profile.education, "");

        let form: ProfileInput = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "skills": "Python\nSQL"
        }))
        .unwrap();
        assert!(matches!(form, ProfileInput::Form(_)));
        assert_eq!(Profile::from(form).skills, vec!["Python", "SQL"]);
    }
}
