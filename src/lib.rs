pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod numeric;
pub mod pipeline;
pub mod report;

pub use error::{CalibrationError, Result};
pub use model::{
    AdjustmentTable, CalibratedDistribution, CalibrationProfile, ClassCatalog, RankedPrediction,
    ScoreVector,
};
pub use pipeline::Pipeline;
pub use pipeline::stage1_calibrate::calibrate;
pub use pipeline::stage2_rebalance::rebalance;
pub use pipeline::stage3_rank::top_n;
pub use pipeline::stage4_classify::Prediction;
