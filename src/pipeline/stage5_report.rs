use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::flags::flag_order;
use crate::numeric::{median, p10};
use crate::pipeline::Pipeline;
use crate::pipeline::stage4_classify::Prediction;
use crate::report::json::{render_predictions_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    CalibrationMeta, ClassStat, FlagStat, SummaryData, ToolMeta, format_f64_6, fraction,
};

#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub id: String,
    pub prediction: Prediction,
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub outcomes: &'a [RecordOutcome],
    pub pipeline: &'a Pipeline,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_predictions_tsv(input, &out_dir.join("predictions.tsv"))?;

    let rows = input
        .outcomes
        .iter()
        .map(|o| (o.id.as_str(), &o.prediction));
    let predictions = render_predictions_json(rows).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("predictions.json"), &predictions)?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        records = input.outcomes.len(),
        "reports written"
    );
    Ok(())
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let pipeline = input.pipeline;
    let catalog = pipeline.catalog();
    let table = pipeline.table();
    let profile = pipeline.profile();
    let n = input.outcomes.len();

    let mut counts = vec![0usize; catalog.len()];
    let mut confidences = Vec::with_capacity(n);
    for outcome in input.outcomes {
        if let Some(c) = counts.get_mut(outcome.prediction.predicted_class) {
            *c += 1;
        }
        confidences.push(outcome.prediction.confidence);
    }

    let classes = catalog
        .iter()
        .zip(counts)
        .map(|(class, count)| ClassStat {
            code: class.code.clone(),
            label: class.label.clone(),
            count,
            fraction: fraction(count, n),
        })
        .collect();

    let flags = flag_order()
        .iter()
        .map(|flag| {
            let count = input
                .outcomes
                .iter()
                .filter(|o| o.prediction.flags.contains(flag))
                .count();
            FlagStat {
                name: flag.as_str(),
                count,
                fraction: fraction(count, n),
            }
        })
        .collect();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        calibration: CalibrationMeta {
            profile: profile.name.to_string(),
            temperature: profile.temperature,
            top_n: profile.top_n,
            rebalance: profile.rebalance,
            majority_class: table.majority_class().map(str::to_string),
            multipliers: table
                .entries()
                .iter()
                .map(|e| (e.class.clone(), e.multiplier))
                .collect(),
        },
        n_records: n,
        classes,
        confidence_median: median(&confidences),
        confidence_p10: p10(&confidences),
        flags,
    }
}

fn write_predictions_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = vec![
        "id".to_string(),
        "predicted_class".to_string(),
        "label".to_string(),
        "confidence".to_string(),
        "flags".to_string(),
    ];
    for class in input.pipeline.catalog().iter() {
        header.push(format!("p_{}", class.code));
    }
    writeln!(w, "{}", header.join("\t"))?;

    for outcome in input.outcomes {
        let p = &outcome.prediction;
        let flags = if p.flags.is_empty() {
            "-".to_string()
        } else {
            p.flags
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        let mut row = vec![
            outcome.id.clone(),
            p.class_code.clone(),
            p.label.clone(),
            format!("{:.2}", p.confidence),
            flags,
        ];
        for &prob in p.distribution.probabilities() {
            row.push(format_f64_6(prob));
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
