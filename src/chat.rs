//! Assistant persona, prompt assembly, and reply post-processing.
//!
//! The assistant is a single system+user exchange: a fixed
//! persona/disclaimer template, an optional profile block, a language
//! instruction, and the user's message. The hosted model's reply comes
//! back verbatim apart from light tidying (persona-prefix stripping and
//! bullet normalization).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{Language, UserProfile};

/// Fixed persona and disclaimer rules sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are a helpful healthcare assistant. Your role is to:
1. Provide general health information and guidance
2. Help users understand medication information
3. Explain medical terms in simple language
4. Always recommend consulting healthcare professionals for specific medical advice
5. Be empathetic and supportive while maintaining professionalism
6. Never provide specific medical diagnoses or treatment plans

Important disclaimers to include when relevant:
- \"This information is for general guidance only\"
- \"Please consult with your healthcare provider for personalized advice\"
- \"In case of emergency, seek immediate medical attention\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a chat widget's append-only transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Build the full user prompt: profile block, language instruction,
/// then the message itself.
pub fn build_user_prompt(
    message: &str,
    language: Language,
    profile: Option<&UserProfile>,
) -> String {
    let mut prompt = String::new();

    if let Some(profile) = profile.filter(|p| !p.is_empty_for_prompt()) {
        prompt.push_str(&profile_block(profile));
        prompt.push_str(
            "\nPlease provide responses that take into account these factors and any \
             potential interactions or considerations.\n\n",
        );
    }

    prompt.push_str(&format!(
        "Please respond in {}.\n\n",
        language.display_name()
    ));
    prompt.push_str(&format!("User message: {message}"));
    prompt
}

/// Render the patient-characteristics block. Only set fields appear.
pub fn profile_block(profile: &UserProfile) -> String {
    let mut block =
        String::from("You are speaking with a patient with the following characteristics:\n");

    if let Some(age) = profile.age {
        block.push_str(&format!("- Age: {age}\n"));
    }
    if let Some(gender) = profile.gender {
        let gender = serde_json::to_value(gender)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        block.push_str(&format!("- Gender: {gender}\n"));
    }
    if !profile.health_conditions.is_empty() {
        block.push_str(&format!(
            "- Current Health Conditions: {}\n",
            profile.health_conditions.join(", ")
        ));
    }
    if !profile.allergies.is_empty() {
        block.push_str(&format!("- Allergies: {}\n", profile.allergies.join(", ")));
    }
    if !profile.current_medications.is_empty() {
        block.push_str(&format!(
            "- Current Medications: {}\n",
            profile.current_medications.join(", ")
        ));
    }
    if !profile.medical_history.is_empty() {
        block.push_str(&format!(
            "- Medical History: {}\n",
            profile.medical_history.join(", ")
        ));
    }

    block.push_str("- Lifestyle:\n");
    block.push_str(&format!(
        "  * Smoking: {}\n",
        if profile.lifestyle.smoking { "Yes" } else { "No" }
    ));
    block.push_str(&format!(
        "  * Alcohol: {}\n",
        if profile.lifestyle.alcohol { "Yes" } else { "No" }
    ));
    block.push_str(&format!(
        "  * Exercise Level: {:?}\n",
        profile.lifestyle.exercise
    ));
    block.push_str(&format!("  * Diet: {:?}\n", profile.lifestyle.diet));

    block
}

/// Persona prefixes some models prepend despite instructions.
const PERSONA_PREFIXES: &[&str] = &["assistant:", "ai:", "healthcare assistant:", "response:"];

/// Light reply tidying: strip a leading persona prefix, normalize
/// `*` / `-` list markers to `•`, trim surrounding whitespace.
pub fn tidy_reply(raw: &str) -> String {
    let mut text = raw.trim();

    let lowered = text.to_lowercase();
    for prefix in PERSONA_PREFIXES {
        if lowered.starts_with(prefix) {
            text = text[prefix.len()..].trim_start();
            break;
        }
    }

    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if let Some(rest) = trimmed.strip_prefix("* ").or(trimmed.strip_prefix("- ")) {
                format!("{indent}• {rest}")
            } else {
                line.to_string()
            }
        })
        .collect();

    lines.join("\n").trim().to_string()
}
