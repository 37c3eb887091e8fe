use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Equipment categories offered for canned questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    Helmet,
    TurnoutGear,
    Boots,
    Gloves,
    Hood,
    Pants,
}

impl Equipment {
    pub const ALL: [Equipment; 6] = [
        Equipment::Helmet,
        Equipment::TurnoutGear,
        Equipment::Boots,
        Equipment::Gloves,
        Equipment::Hood,
        Equipment::Pants,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Equipment::Helmet => "Helmet",
            Equipment::TurnoutGear => "Turnout Gear",
            Equipment::Boots => "Boots",
            Equipment::Gloves => "Gloves",
            Equipment::Hood => "Hood",
            Equipment::Pants => "Pants",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Equipment {
    type Err = CatalogError;

    /// Accepts display names loosely: `turnout gear`, `Turnout-Gear`, `turnoutgear`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Equipment::ALL
            .into_iter()
            .find(|equipment| normalize(equipment.name()) == wanted)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown equipment category: {0}")]
    UnknownCategory(String),

    #[error("{0} appears more than once")]
    Duplicate(Equipment),

    #[error("{0} has no questions")]
    NoQuestions(Equipment),

    #[error("{0} has a blank question")]
    BlankQuestion(Equipment),

    #[error("{0} is missing from the catalog")]
    Missing(Equipment),
}

const STANDARD_QUESTIONS: [(Equipment, &[&str]); 6] = [
    (
        Equipment::Helmet,
        &[
            "What are the features and functions of my helmet?",
            "How do I properly don, doff, and adjust my helmet?",
            "What are the limitations and purpose of my helmet?",
            "How do I install replacement parts or make repairs to my helmet?",
            "How do I store my helmet properly?",
            "How can I minimize the risk of injury while using my helmet?",
        ],
    ),
    (
        Equipment::TurnoutGear,
        &[
            "What are the construction, features, and function of my garment?",
            "What is the proper procedure for donning and doffing my MT94 ensemble?",
            "How do I ensure proper overlap and fit of my turnout gear?",
            "What are the limitations and purpose of my garment?",
            "What is the correct method for reassembling my turnout gear?",
        ],
    ),
    (
        Equipment::Boots,
        &[
            "What are the limitations and purpose of my fire boots?",
            "How can I minimize the risk of injury while using my fire boots?",
            "What is the correct way to clean, decontaminate, and disinfect my fire boots?",
            "How do I ensure proper size and fit of my fire boots?",
            "What safety features should I be aware of for my fire boots?",
        ],
    ),
    (
        Equipment::Gloves,
        &[
            "What are the limitations and purpose of structural gloves?",
            "How do I properly wash, decontaminate, and store my gloves?",
            "How can I ensure my structural gloves are being used safely?",
        ],
    ),
    (
        Equipment::Hood,
        &[
            "What are the limitations and purpose of my hood?",
            "How do I wash, decontaminate, and store my hood?",
            "How can I minimize the risk of injury while using my hood?",
        ],
    ),
    (
        Equipment::Pants,
        &[
            "What are the limitations and purpose of my pants?",
            "How do I don and doff my pants properly?",
            "What is the proper way to wash, decontaminate, and sanitize my pants?",
        ],
    ),
];

/// Category → ordered canned questions, complete for every [`Equipment`]
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    entries: Vec<(Equipment, Vec<String>)>,
}

impl EquipmentCatalog {
    pub fn new(
        entries: impl IntoIterator<Item = (Equipment, Vec<String>)>,
    ) -> Result<Self, CatalogError> {
        let mut seen: Vec<(Equipment, Vec<String>)> = Vec::new();
        for (equipment, questions) in entries {
            if seen.iter().any(|(existing, _)| *existing == equipment) {
                return Err(CatalogError::Duplicate(equipment));
            }
            if questions.is_empty() {
                return Err(CatalogError::NoQuestions(equipment));
            }
            if questions.iter().any(|q| q.trim().is_empty()) {
                return Err(CatalogError::BlankQuestion(equipment));
            }
            seen.push((equipment, questions));
        }

        if let Some(missing) = Equipment::ALL
            .into_iter()
            .find(|equipment| !seen.iter().any(|(e, _)| e == equipment))
        {
            return Err(CatalogError::Missing(missing));
        }

        // Present categories in their canonical order
        seen.sort_by_key(|(equipment, _)| {
            Equipment::ALL.iter().position(|e| e == equipment)
        });
        Ok(Self { entries: seen })
    }

    /// The catalog shipped with the client
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(STANDARD_QUESTIONS.iter().map(|(equipment, questions)| {
            (
                *equipment,
                questions.iter().map(|q| q.to_string()).collect(),
            )
        }))
    }

    pub fn categories(&self) -> impl Iterator<Item = Equipment> + '_ {
        self.entries.iter().map(|(equipment, _)| *equipment)
    }

    pub fn questions(&self, equipment: Equipment) -> &[String] {
        self.entries
            .iter()
            .find(|(e, _)| *e == equipment)
            .map(|(_, questions)| questions.as_slice())
            .unwrap_or(&[])
    }
}
