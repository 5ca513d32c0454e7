//! Offline `TextGenerator` with canned answers, selected with `LLM_BACKEND=mock`.
//!
//! Useful for demos and UI work without a Gemini key or quota.

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

const CANNED_SUMMARY: &str = "Motivated data professional with hands-on experience building \
    predictive models and analysing large datasets. Comfortable across Python, SQL and cloud \
    tooling, with a record of turning ambiguous questions into shipped analyses.";

const CANNED_BULLETS: &str = "• Built and deployed a predictive model that lifted accuracy by 25%\n\
    • Processed 1M+ records with Python and SQL to surface actionable trends\n\
    • Partnered with product and engineering to land data-driven recommendations";

const CANNED_COVER_LETTER: &str = "Dear Hiring Manager,\n\n\
    I am excited to apply for this role. My studies and internship work have given me a solid \
    grounding in machine learning, statistics and data engineering.\n\n\
    Most recently I built a churn model that reached 85% accuracy and informed the retention \
    roadmap, while my research work sharpened my ability to reason about messy, large-scale data.\n\n\
    I would welcome the chance to bring that experience to your team. Thank you for your time \
    and consideration.\n\n\
    Sincerely,\n[Your Name]";

const CANNED_PORTFOLIO: &str = "This project applies natural language processing to classify \
    sentiment in social media posts.\n\n\
    **Key Achievements:**\n\
    • Trained a deep learning classifier reaching 92% accuracy\n\
    • Cleaned and analysed more than 500,000 posts\n\
    • Served predictions through a small REST API\n\n\
    **Technologies Used:** Python, TensorFlow, Pandas";

const CANNED_FALLBACK: &str = "Generated content based on your profile.";

/// Returns a canned answer chosen by keywords in the prompt. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedGenerator;

impl CannedGenerator {
    fn answer(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();
        if prompt.contains("professional summary") || prompt.contains("resume summary") {
            CANNED_SUMMARY
        } else if prompt.contains("accomplishment") {
            CANNED_BULLETS
        } else if prompt.contains("cover letter") {
            CANNED_COVER_LETTER
        } else if prompt.contains("portfolio") || prompt.contains("project description") {
            CANNED_PORTFOLIO
        } else {
            CANNED_FALLBACK
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        Ok(Self::answer(prompt).to_string())
    }
}
