pub mod adjustment;
pub mod catalog;
pub mod distribution;
pub mod flags;
pub mod profile;

pub use adjustment::{AdjustmentTable, ClassAdjustment};
pub use catalog::{ClassCatalog, ClassInfo, RiskLevel};
pub use distribution::{
    CalibratedDistribution, Provenance, RankedEntry, RankedPrediction, ScoreVector,
};
pub use flags::Flag;
pub use profile::{CalibrationProfile, ProfilePreset};
