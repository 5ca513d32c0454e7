//! Multi-call compositions: the resume sections view and the full document.
//!
//! Calls run strictly one after another. The full document waits a fixed
//! delay between consecutive calls to stay under the provider's
//! requests-per-minute ceiling; this is blind pacing, not a token bucket.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::generation::client::{Generation, GenerationClient};
use crate::generation::profile::Profile;
use crate::generation::prompts::{accomplishment_prompt, cover_letter_prompt, summary_prompt};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One experience or project line with the bullets generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedItem {
    pub item: String,
    pub bullets: String,
}

/// Summary plus the first experience and first project, enhanced.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSections {
    pub summary: String,
    pub skills: String,
    pub enhanced_experience: Option<EnhancedItem>,
    pub enhanced_project: Option<EnhancedItem>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FullDocument {
    pub name: String,
    pub summary: String,
    pub skills: String,
    pub experience: Vec<EnhancedItem>,
    pub projects: Vec<EnhancedItem>,
    pub cover_letter: String,
    pub generated_at: DateTime<Utc>,
    pub warnings: Vec<String>,
}

fn skills_line(profile: &Profile) -> String {
    profile.skills.join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Pacing
// ────────────────────────────────────────────────────────────────────────────

/// Runs generation calls in order, sleeping `delay` before every call but the
/// first, and gathers their warnings.
struct PacedRun<'a> {
    client: &'a GenerationClient,
    delay: Duration,
    calls: usize,
    warnings: Vec<String>,
}

impl<'a> PacedRun<'a> {
    fn new(client: &'a GenerationClient, delay: Duration) -> Self {
        Self {
            client,
            delay,
            calls: 0,
            warnings: Vec::new(),
        }
    }

    async fn generate(&mut self, prompt: &str) -> String {
        if self.calls > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls += 1;

        let Generation { text, warnings } = self.client.generate(prompt).await;
        self.warnings.extend(warnings);
        text
    }

    async fn enhance(&mut self, profile: &Profile, item: &str) -> EnhancedItem {
        let bullets = self.generate(&accomplishment_prompt(profile, item)).await;
        EnhancedItem {
            item: item.to_string(),
            bullets,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compositions
// ────────────────────────────────────────────────────────────────────────────

/// Summary, skills, and bullets for the first experience and project items.
pub async fn generate_resume_sections(
    client: &GenerationClient,
    profile: &Profile,
) -> ResumeSections {
    let mut run = PacedRun::new(client, Duration::ZERO);

    let summary = run.generate(&summary_prompt(profile)).await;

    let enhanced_experience = match profile.experience.first() {
        Some(item) => Some(run.enhance(profile, item).await),
        None => None,
    };
    let enhanced_project = match profile.projects.first() {
        Some(item) => Some(run.enhance(profile, item).await),
        None => None,
    };

    ResumeSections {
        summary,
        skills: skills_line(profile),
        enhanced_experience,
        enhanced_project,
        warnings: run.warnings,
    }
}

/// Generates every section of the full document in order: summary, one call
/// per experience item, one per project item, then the cover letter.
pub async fn generate_full_document(
    client: &GenerationClient,
    profile: &Profile,
    job_description: Option<&str>,
    call_delay: Duration,
) -> FullDocument {
    let total_calls = 2 + profile.experience.len() + profile.projects.len();
    info!(
        "Assembling full document for '{}': {} generation calls, {}s apart",
        profile.name,
        total_calls,
        call_delay.as_secs()
    );

    let mut run = PacedRun::new(client, call_delay);

    let summary = run.generate(&summary_prompt(profile)).await;

    let mut experience = Vec::with_capacity(profile.experience.len());
    for item in &profile.experience {
        experience.push(run.enhance(profile, item).await);
    }

    let mut projects = Vec::with_capacity(profile.projects.len());
    for item in &profile.projects {
        projects.push(run.enhance(profile, item).await);
    }

    let cover_letter = run
        .generate(&cover_letter_prompt(profile, job_description))
        .await;

    FullDocument {
        name: profile.name.clone(),
        summary,
        skills: skills_line(profile),
        experience,
        projects,
        cover_letter,
        generated_at: Utc::now(),
        warnings: run.warnings,
    }
}

impl FullDocument {
    /// Markdown rendering of the document, sections in generation order.
    pub fn to_markdown(&self) -> String {
        let mut blocks = vec![
            format!("# {}", self.name),
            "---".to_string(),
            "## Professional Summary".to_string(),
            self.summary.clone(),
            "## Skills".to_string(),
            self.skills.clone(),
            "## Experience".to_string(),
        ];
        push_items(&mut blocks, &self.experience);
        blocks.push("## Projects".to_string());
        push_items(&mut blocks, &self.projects);
        blocks.extend([
            "---".to_string(),
            "## Cover Letter".to_string(),
            self.cover_letter.clone(),
        ]);

        blocks.join("\n\n")
    }
}

fn push_items(blocks: &mut Vec<String>, items: &[EnhancedItem]) {
    for enhanced in items {
        blocks.push(format!("**{}**", enhanced.item));
        blocks.push(enhanced.bullets.clone());
    }
}
