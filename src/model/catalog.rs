use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    pub fn is_elevated(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::VeryHigh)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LesionClassDef {
    pub code: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub risk: RiskLevel,
    pub action: &'static str,
}

const HAM10000_CLASSES: &[LesionClassDef] = &[
    LesionClassDef {
        code: "akiec",
        label: "Actinic Keratoses",
        description: "Rough, scaly patches caused by years of sun exposure; precancerous.",
        risk: RiskLevel::Moderate,
        action: "Consult a dermatologist within 1-2 months for evaluation and possible treatment.",
    },
    LesionClassDef {
        code: "bcc",
        label: "Basal Cell Carcinoma",
        description: "Most common skin cancer; pearly or waxy bump, or flat scar-like lesion.",
        risk: RiskLevel::High,
        action: "Seek medical attention within 2-4 weeks. Early treatment has excellent outcomes.",
    },
    LesionClassDef {
        code: "bkl",
        label: "Benign Keratosis",
        description: "Non-cancerous waxy, scaly, slightly raised growth.",
        risk: RiskLevel::Low,
        action: "Regular monitoring recommended. Consult a dermatologist during your next regular check-up.",
    },
    LesionClassDef {
        code: "df",
        label: "Dermatofibroma",
        description: "Common benign small firm bump, pink to light brown.",
        risk: RiskLevel::Low,
        action: "No immediate action required. Monitor for changes in appearance.",
    },
    LesionClassDef {
        code: "mel",
        label: "Melanoma",
        description: "Most serious form of skin cancer; new or changing spot.",
        risk: RiskLevel::VeryHigh,
        action: "Urgent medical attention required. Schedule an appointment with a dermatologist within 1-2 weeks.",
    },
    LesionClassDef {
        code: "nv",
        label: "Melanocytic Nevi",
        description: "Common, usually benign moles.",
        risk: RiskLevel::Low,
        action: "Regular self-examination recommended. Consult a dermatologist if you notice changes.",
    },
    LesionClassDef {
        code: "vasc",
        label: "Vascular Lesions",
        description: "Benign growths made up of blood vessels.",
        risk: RiskLevel::Low,
        action: "No immediate action required. Monitor for changes in size or color.",
    },
];

pub fn builtin_classes() -> &'static [LesionClassDef] {
    HAM10000_CLASSES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub code: String,
    pub label: String,
    pub description: String,
    pub risk: RiskLevel,
    pub action: String,
}

impl From<&LesionClassDef> for ClassInfo {
    fn from(def: &LesionClassDef) -> Self {
        Self {
            code: def.code.to_string(),
            label: def.label.to_string(),
            description: def.description.to_string(),
            risk: def.risk,
            action: def.action.to_string(),
        }
    }
}

/// Ordered class list. Position `i` is the class of model output `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCatalog {
    classes: Vec<ClassInfo>,
}

impl ClassCatalog {
    pub fn new(classes: Vec<ClassInfo>) -> Result<Self> {
        if classes.is_empty() {
            return Err(CalibrationError::invalid("class catalog is empty"));
        }
        for (i, class) in classes.iter().enumerate() {
            if class.code.trim().is_empty() {
                return Err(CalibrationError::invalid(format!(
                    "class at index {i} has an empty identifier"
                )));
            }
            if classes[..i].iter().any(|c| c.code == class.code) {
                return Err(CalibrationError::invalid(format!(
                    "duplicate class identifier '{}'",
                    class.code
                )));
            }
            // labels key the per-class probability map
            if class.label.trim().is_empty() {
                return Err(CalibrationError::invalid(format!(
                    "class '{}' has an empty label",
                    class.code
                )));
            }
            if classes[..i].iter().any(|c| c.label == class.label) {
                return Err(CalibrationError::invalid(format!(
                    "duplicate class label '{}'",
                    class.label
                )));
            }
        }
        Ok(Self { classes })
    }

    pub fn ham10000() -> Self {
        Self {
            classes: builtin_classes().iter().map(ClassInfo::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassInfo> {
        self.classes.get(index)
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassInfo> {
        self.classes.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.code.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/catalog.rs"]
mod tests;
