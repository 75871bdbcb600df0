//! User health profile.
//!
//! The profile is owned by the client session; the server receives it
//! (whole or in slices) per request and never persists it. The accessor
//! methods exist so the invariants live in one place: `recently_viewed`
//! holds at most 10 unique ids, most recent first.

use serde::{Deserialize, Serialize};

/// Maximum number of recently viewed medicine ids kept on a profile.
pub const RECENTLY_VIEWED_CAP: usize = 10;

/// UI languages supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Zh,
    Ar,
    Hi,
    Sw,
    Pt,
    Ru,
    Ja,
    Ko,
    It,
    Nl,
    Tr,
}

impl Language {
    /// English display name, used in the "respond in ..." prompt line.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Zh => "Chinese",
            Language::Ar => "Arabic",
            Language::Hi => "Hindi",
            Language::Sw => "Swahili",
            Language::Pt => "Portuguese",
            Language::Ru => "Russian",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::It => "Italian",
            Language::Nl => "Dutch",
            Language::Tr => "Turkish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseLevel {
    #[default]
    None,
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Lifestyle {
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub alcohol: bool,
    #[serde(default)]
    pub exercise: ExerciseLevel,
    #[serde(default)]
    pub diet: Diet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Per-session user profile. All fields default so clients can send a
/// partial profile block on any request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub language: Language,
    pub secondary_language: Option<Language>,
    pub age: Option<u32>,
    pub gender: Option<Sex>,
    pub health_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
    pub medical_history: Vec<String>,
    pub lifestyle: Lifestyle,
    pub emergency_contact: Option<EmergencyContact>,
    pub recently_viewed: Vec<String>,
    pub saved_medicines: Vec<String>,
}

impl UserProfile {
    pub fn add_health_condition(&mut self, condition: &str) {
        push_trimmed(&mut self.health_conditions, condition);
    }

    pub fn remove_health_condition(&mut self, condition: &str) {
        self.health_conditions.retain(|c| c != condition);
    }

    pub fn add_allergy(&mut self, allergy: &str) {
        push_trimmed(&mut self.allergies, allergy);
    }

    pub fn remove_allergy(&mut self, allergy: &str) {
        self.allergies.retain(|a| a != allergy);
    }

    pub fn add_current_medication(&mut self, medication: &str) {
        push_trimmed(&mut self.current_medications, medication);
    }

    pub fn remove_current_medication(&mut self, medication: &str) {
        self.current_medications.retain(|m| m != medication);
    }

    pub fn add_medical_history(&mut self, entry: &str) {
        push_trimmed(&mut self.medical_history, entry);
    }

    pub fn remove_medical_history(&mut self, entry: &str) {
        self.medical_history.retain(|e| e != entry);
    }

    pub fn update_lifestyle(&mut self, lifestyle: Lifestyle) {
        self.lifestyle = lifestyle;
    }

    pub fn update_emergency_contact(&mut self, contact: Option<EmergencyContact>) {
        self.emergency_contact = contact;
    }

    /// Record a viewed medicine id: moves to the front, deduplicates,
    /// truncates to [`RECENTLY_VIEWED_CAP`].
    pub fn add_recently_viewed(&mut self, medicine_id: &str) {
        self.recently_viewed.retain(|id| id != medicine_id);
        self.recently_viewed.insert(0, medicine_id.to_string());
        self.recently_viewed.truncate(RECENTLY_VIEWED_CAP);
    }

    /// Save or unsave a medicine id.
    pub fn toggle_saved_medicine(&mut self, medicine_id: &str) {
        if self.saved_medicines.iter().any(|id| id == medicine_id) {
            self.saved_medicines.retain(|id| id != medicine_id);
        } else {
            self.saved_medicines.push(medicine_id.to_string());
        }
    }

    /// True when no field that feeds the assistant prompt is set.
    pub fn is_empty_for_prompt(&self) -> bool {
        self.age.is_none()
            && self.gender.is_none()
            && self.health_conditions.is_empty()
            && self.allergies.is_empty()
            && self.current_medications.is_empty()
            && self.medical_history.is_empty()
            && self.lifestyle == Lifestyle::default()
    }
}

fn push_trimmed(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        list.push(value.to_string());
    }
}
