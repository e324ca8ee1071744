use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    LowConfidence,
    HighEntropy,
    NarrowMargin,
    HighRiskClass,
    Rebalanced,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::LowConfidence => "LOW_CONFIDENCE",
            Flag::HighEntropy => "HIGH_ENTROPY",
            Flag::NarrowMargin => "NARROW_MARGIN",
            Flag::HighRiskClass => "HIGH_RISK_CLASS",
            Flag::Rebalanced => "REBALANCED",
        }
    }
}

pub fn flag_order() -> &'static [Flag] {
    &[
        Flag::LowConfidence,
        Flag::HighEntropy,
        Flag::NarrowMargin,
        Flag::HighRiskClass,
        Flag::Rebalanced,
    ]
}
