//! Profile Assembler — turns a `Profile` into the prompt text for each task.
//!
//! Caller text is interpolated verbatim. No escaping: the output is a
//! generation prompt, not a security boundary.

use crate::generation::profile::Profile;

pub const SUMMARY_INSTRUCTION: &str = "\n\nGenerate a professional resume summary (2-3 sentences) \
highlighting key skills and experiences.";

pub const COVER_LETTER_INSTRUCTION: &str = "\n\nGenerate a professional cover letter (3-5 paragraphs) \
highlighting relevant skills and experiences.";

/// Builds the base block shared by every task prompt.
///
/// Name and Education lines are always present. Skills, Experience and
/// Projects headers only appear when the collection has items.
pub fn build_prompt(profile: &Profile) -> String {
    let mut lines = vec![
        format!("Student Name: {}", profile.name),
        format!("Education: {}", profile.education),
    ];

    push_section(&mut lines, "Skills:", &profile.skills);
    push_section(&mut lines, "Experience:", &profile.experience);
    push_section(&mut lines, "Projects:", &profile.projects);

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(header.to_string());
    lines.extend(items.iter().map(|item| format!("- {item}")));
}

pub fn summary_prompt(profile: &Profile) -> String {
    build_prompt(profile) + SUMMARY_INSTRUCTION
}

/// `item` is one experience or project line, quoted as-is.
pub fn accomplishment_prompt(profile: &Profile, item: &str) -> String {
    format!(
        "{}\n\nTransform this into accomplishment-driven bullet points: '{item}'",
        build_prompt(profile)
    )
}

/// A blank job description is treated as absent.
pub fn cover_letter_prompt(profile: &Profile, job_description: Option<&str>) -> String {
    let mut prompt = build_prompt(profile) + COVER_LETTER_INSTRUCTION;
    if let Some(job) = job_description.filter(|jd| !jd.trim().is_empty()) {
        prompt.push_str("\n\nTailor to this job: ");
        prompt.push_str(job);
    }
    prompt
}

pub fn portfolio_prompt(profile: &Profile, item: &str) -> String {
    format!(
        "{}\n\nGenerate detailed portfolio description for: '{item}'",
        build_prompt(profile)
    )
}
