use serde::Serialize;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ClassStat {
    pub code: String,
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationMeta {
    pub profile: String,
    pub temperature: f64,
    pub top_n: usize,
    pub rebalance: bool,
    pub majority_class: Option<String>,
    pub multipliers: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub calibration: CalibrationMeta,
    pub n_records: usize,
    pub classes: Vec<ClassStat>,
    pub confidence_median: f64,
    pub confidence_p10: f64,
    pub flags: Vec<FlagStat>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}
