//! Static medicine catalog: fixture data, name normalization, lookup.
//!
//! The catalog is the fixed fallback dataset used when the drug-label
//! API has no match, and the source for recommendations. Records are
//! immutable: there is no create/update/delete lifecycle.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Free-text AI-style companion info for a catalog record. Returned to
/// clients as the `aiGeneratedInfo` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDetails {
    pub primary_uses: Vec<String>,
    pub additional_uses: Vec<String>,
    pub mechanism_of_action: String,
    pub dosage_info: String,
    pub personalized_info: String,
}

/// One fixture medicine. Ingredient strings carry an `Active: ` /
/// `Inactive: ` prefix, matching the wire format clients render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    pub id: String,
    pub name: String,
    pub overview: String,
    pub ingredients: Vec<String>,
    pub side_effects: Vec<String>,
    pub conditions_treated: Vec<String>,
    pub contraindications: Vec<String>,
    pub herbal_alternatives: Vec<String>,
    #[serde(rename = "aiGeneratedInfo")]
    pub details: MedicineDetails,
}

/// Result of a catalog lookup. A miss is a value, never an error: the
/// normalized query is kept for diagnostic display.
#[derive(Debug, Clone)]
pub enum Lookup<'a> {
    Found(&'a MedicineRecord),
    NotFound { normalized: String },
}

pub struct Catalog {
    records: Vec<MedicineRecord>,
}

impl Catalog {
    /// Exact lookup by already-normalized key.
    pub fn get(&self, key: &str) -> Option<&MedicineRecord> {
        self.records
            .iter()
            .find(|r| normalize_name(&r.name) == key)
    }

    /// Normalize free text and look it up.
    pub fn lookup(&self, raw: &str) -> Lookup<'_> {
        let normalized = normalize_name(raw);
        match self.get(&normalized) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound { normalized },
        }
    }

    /// Substring containment in either direction, for the drug-label
    /// gateway's final fallback. Not used for the primary search path.
    pub fn find_by_containment(&self, name: &str) -> Option<&MedicineRecord> {
        let needle = normalize_name(name);
        if needle.is_empty() {
            return None;
        }
        self.records.iter().find(|r| {
            let key = normalize_name(&r.name);
            key.contains(&needle) || needle.contains(&key)
        })
    }

    /// Normalized catalog keys, in fixture order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(|r| normalize_name(&r.name))
    }

    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }
}

/// Normalize a medicine name for catalog lookup: lowercase, strip all
/// characters outside ASCII alphanumerics / whitespace / hyphen, collapse
/// whitespace runs, trim. Idempotent.
pub fn normalize_name(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The shared catalog instance.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    records: vec![
        MedicineRecord {
            id: "quinine-001".into(),
            name: "Quinine".into(),
            overview: "Quinine is a medication used to treat malaria and babesiosis.".into(),
            ingredients: vec![
                "Active: Quinine sulfate".into(),
                "Inactive: Starch".into(),
                "Inactive: Magnesium stearate".into(),
                "Inactive: Talc".into(),
            ],
            side_effects: vec![
                "Nausea".into(),
                "Vomiting".into(),
                "Headache".into(),
                "Cardiac arrhythmias".into(),
                "Thrombocytopenia".into(),
            ],
            conditions_treated: vec![
                "Malaria".into(),
                "Babesiosis".into(),
                "Nocturnal leg cramps".into(),
            ],
            contraindications: vec![
                "History of quinine hypersensitivity".into(),
                "Severe kidney or liver disease".into(),
                "Blood disorders".into(),
                "Pregnancy (especially first trimester)".into(),
                "History of thrombocytopenia".into(),
            ],
            herbal_alternatives: vec![
                "Artemisia annua (Sweet wormwood)".into(),
                "Cinchona bark".into(),
            ],
            details: MedicineDetails {
                primary_uses: vec![
                    "Treatment of malaria".into(),
                    "Management of muscle cramps".into(),
                    "Prevention of leg cramps".into(),
                ],
                additional_uses: vec![
                    "Treatment of certain parasitic infections".into(),
                    "Management of fever in malaria patients".into(),
                ],
                mechanism_of_action: "Quinine works by interfering with the growth and \
                    reproduction of the malaria parasite in red blood cells. It also affects \
                    the excitability of muscle fibers, which helps with muscle cramps."
                    .into(),
                dosage_info: "The typical dosage for malaria treatment is 600-650mg every 8 \
                    hours for 7 days. For leg cramps, the dosage is typically 200-300mg at \
                    bedtime. Always follow your healthcare provider's instructions."
                    .into(),
                personalized_info: "Quinine is a medication that is often used to treat \
                    malaria, a disease that is spread through the bites of infected \
                    mosquitoes. It is also sometimes used to relieve muscle cramps and \
                    prevent leg cramps in people with certain medical conditions. However, \
                    it is important to note that quinine can have serious side effects and \
                    should only be used under the supervision of a healthcare professional."
                    .into(),
            },
        },
        MedicineRecord {
            id: "aspirin-001".into(),
            name: "Aspirin".into(),
            overview: "Aspirin is used to reduce fever and relieve mild to moderate pain."
                .into(),
            ingredients: vec![
                "Active: Acetylsalicylic acid".into(),
                "Inactive: Cellulose".into(),
                "Inactive: Corn starch".into(),
                "Inactive: Hypromellose".into(),
            ],
            side_effects: vec![
                "Upset stomach".into(),
                "Heartburn".into(),
                "Stomach bleeding".into(),
                "Allergic reactions".into(),
            ],
            conditions_treated: vec![
                "Headaches".into(),
                "Muscle aches".into(),
                "Arthritis".into(),
                "Fever".into(),
            ],
            contraindications: vec![
                "Allergy to aspirin".into(),
                "Bleeding disorders".into(),
                "Stomach ulcers".into(),
                "Asthma".into(),
                "Pregnancy (especially third trimester)".into(),
            ],
            herbal_alternatives: vec!["Willow bark".into(), "White willow".into()],
            details: MedicineDetails {
                primary_uses: vec![
                    "Pain relief".into(),
                    "Fever reduction".into(),
                    "Anti-inflammatory".into(),
                ],
                additional_uses: vec![
                    "Blood thinning".into(),
                    "Prevention of heart attacks".into(),
                    "Prevention of strokes".into(),
                ],
                mechanism_of_action: "Aspirin works by inhibiting the production of \
                    prostaglandins, which are chemicals that cause pain, fever, and \
                    inflammation. It also helps prevent blood clots by making platelets \
                    less sticky."
                    .into(),
                dosage_info: "For adults and children 12 years and older: 325-650mg every \
                    4-6 hours as needed, not exceeding 4000mg in 24 hours. For children \
                    under 12: consult a healthcare provider for appropriate dosage."
                    .into(),
                personalized_info: "Aspirin is a common over-the-counter medication used to \
                    relieve pain, reduce fever, and decrease inflammation. It is also used \
                    in low doses to prevent heart attacks and strokes in people at high \
                    risk. However, it can cause stomach irritation and should be used with \
                    caution in people with certain medical conditions."
                    .into(),
            },
        },
        MedicineRecord {
            id: "paracetamol-001".into(),
            name: "Paracetamol".into(),
            overview: "Paracetamol is used to treat pain and fever.".into(),
            ingredients: vec![
                "Active: Paracetamol".into(),
                "Inactive: Pregelatinized starch".into(),
                "Inactive: Potato starch".into(),
                "Inactive: Stearic acid".into(),
            ],
            side_effects: vec![
                "Nausea".into(),
                "Stomach pain".into(),
                "Liver damage".into(),
                "Allergic reactions".into(),
            ],
            conditions_treated: vec![
                "Headaches".into(),
                "Muscle aches".into(),
                "Arthritis".into(),
                "Backaches".into(),
                "Toothaches".into(),
                "Colds".into(),
                "Fevers".into(),
            ],
            contraindications: vec![
                "Severe liver disease".into(),
                "Allergy to paracetamol".into(),
                "Alcohol abuse".into(),
            ],
            herbal_alternatives: vec![
                "Willow bark".into(),
                "Ginger".into(),
                "Turmeric".into(),
            ],
            details: MedicineDetails {
                primary_uses: vec!["Pain relief".into(), "Fever reduction".into()],
                additional_uses: vec![
                    "Post-surgical pain management".into(),
                    "Post-vaccination fever".into(),
                ],
                mechanism_of_action: "Paracetamol works by inhibiting the production of \
                    prostaglandins in the brain, which are chemicals that cause pain and \
                    fever. It is thought to work primarily in the central nervous system."
                    .into(),
                dosage_info: "For adults and children 12 years and older: 500-1000mg every \
                    4-6 hours as needed, not exceeding 4000mg in 24 hours. For children \
                    under 12: consult a healthcare provider for appropriate dosage."
                    .into(),
                personalized_info: "Paracetamol (also known as acetaminophen) is a common \
                    over-the-counter medication used to relieve pain and reduce fever. It \
                    is generally safe when used as directed, but it's important to be \
                    aware of the maximum daily dose to avoid liver damage."
                    .into(),
            },
        },
        MedicineRecord {
            id: "ibuprofen-001".into(),
            name: "Ibuprofen".into(),
            overview: "Ibuprofen is a non-steroidal anti-inflammatory drug used to relieve \
                pain, swelling, and inflammation."
                .into(),
            ingredients: vec![
                "Active: Ibuprofen".into(),
                "Inactive: Colloidal silicon dioxide".into(),
                "Inactive: Corn starch".into(),
                "Inactive: Croscarmellose sodium".into(),
            ],
            side_effects: vec![
                "Stomach pain".into(),
                "Heartburn".into(),
                "Dizziness".into(),
                "Kidney problems".into(),
            ],
            conditions_treated: vec![
                "Pain".into(),
                "Inflammation".into(),
                "Fever".into(),
                "Arthritis".into(),
            ],
            contraindications: vec![
                "Stomach ulcers".into(),
                "Kidney disease".into(),
                "Heart failure".into(),
                "Allergy to aspirin or NSAIDs".into(),
            ],
            herbal_alternatives: vec!["Turmeric".into(), "Boswellia".into()],
            details: MedicineDetails {
                primary_uses: vec![
                    "Pain relief".into(),
                    "Inflammation reduction".into(),
                    "Fever reduction".into(),
                ],
                additional_uses: vec![
                    "Menstrual cramp relief".into(),
                    "Migraine management".into(),
                ],
                mechanism_of_action: "Ibuprofen works by inhibiting cyclooxygenase (COX) \
                    enzymes, which reduces the production of prostaglandins responsible \
                    for pain, fever, and inflammation."
                    .into(),
                dosage_info: "For adults: 200-400mg every 4-6 hours as needed, not \
                    exceeding 1200mg in 24 hours without medical supervision. Take with \
                    food to reduce stomach upset."
                    .into(),
                personalized_info: "Ibuprofen is a widely used over-the-counter \
                    anti-inflammatory. It is effective for pain and swelling but can \
                    irritate the stomach and strain the kidneys with prolonged use, so it \
                    should be taken at the lowest effective dose."
                    .into(),
            },
        },
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_name(" Aspirin! "), "aspirin");
        assert_eq!(normalize_name("Co-codamol  500/8"), "co-codamol 5008");
        assert_eq!(normalize_name("PARACETAMOL\t(500 mg)"), "paracetamol 500 mg");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [" Aspirin! ", "Quinine  Sulfate #2", "", "  ", "ibu-profen"] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn lookup_finds_aspirin_from_noisy_query() {
        match catalog().lookup(" Aspirin! ") {
            Lookup::Found(record) => assert_eq!(record.name, "Aspirin"),
            Lookup::NotFound { .. } => panic!("expected aspirin to be found"),
        }
    }

    #[test]
    fn lookup_miss_is_a_value_with_normalized_query() {
        match catalog().lookup("  Unobtainium!  ") {
            Lookup::Found(_) => panic!("should not match"),
            Lookup::NotFound { normalized } => assert_eq!(normalized, "unobtainium"),
        }
    }

    #[test]
    fn containment_matches_either_direction() {
        // Query contains the catalog name
        let hit = catalog().find_by_containment("extra strength aspirin tablets");
        assert_eq!(hit.map(|r| r.name.as_str()), Some("Aspirin"));
        // Catalog name contains the query
        let hit = catalog().find_by_containment("parace");
        assert_eq!(hit.map(|r| r.name.as_str()), Some("Paracetamol"));
        assert!(catalog().find_by_containment("").is_none());
    }

    #[test]
    fn all_records_have_unique_normalized_keys() {
        let keys: Vec<String> = catalog().names().collect();
        let mut dedup = keys.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(keys.len(), dedup.len());
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn ingredients_carry_active_or_inactive_prefix() {
        for record in catalog().records() {
            for ingredient in &record.ingredients {
                assert!(
                    ingredient.starts_with("Active: ") || ingredient.starts_with("Inactive: "),
                    "unprefixed ingredient in {}: {ingredient}",
                    record.name
                );
            }
        }
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(&catalog().records()[0]).unwrap();
        assert!(json.get("sideEffects").is_some());
        assert!(json.get("herbalAlternatives").is_some());
        assert!(json.get("conditionsTreated").is_some());
        assert!(json["aiGeneratedInfo"].get("primaryUses").is_some());
    }
}
