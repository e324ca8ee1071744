use serde::Serialize;

use crate::error::{CalibrationError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationProfile {
    pub name: &'static str,
    pub temperature: f64,
    pub top_n: usize,
    pub rebalance: bool,
    pub confidence_low: f64,
    pub entropy_high: f64,
    pub margin_low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilePreset {
    Default,
    Serving,
}

impl CalibrationProfile {
    pub fn default_v1() -> Self {
        Self {
            name: "default_v1",
            temperature: 1.0,
            top_n: 3,
            rebalance: true,
            confidence_low: 0.40,
            entropy_high: 0.85,
            margin_low: 0.10,
        }
    }

    /// Temperature used by the exported serving signature.
    pub fn serving_v1() -> Self {
        let mut base = Self::default_v1();
        base.name = "serving_v1";
        base.temperature = 1.5;
        base
    }

    pub fn from_preset(preset: ProfilePreset) -> Self {
        match preset {
            ProfilePreset::Default => Self::default_v1(),
            ProfilePreset::Serving => Self::serving_v1(),
        }
    }

    pub fn validate(&self, n_classes: usize) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(CalibrationError::invalid(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            )));
        }
        if self.top_n == 0 || self.top_n > n_classes {
            return Err(CalibrationError::invalid(format!(
                "top_n must be in [1, {n_classes}], got {}",
                self.top_n
            )));
        }
        for (name, v) in [
            ("confidence_low", self.confidence_low),
            ("entropy_high", self.entropy_high),
            ("margin_low", self.margin_low),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CalibrationError::invalid(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}
