use serde::Serialize;

use crate::pipeline::stage4_classify::Prediction;
use crate::report::SummaryData;

#[derive(Serialize)]
struct PredictionRow<'a> {
    id: &'a str,
    prediction: &'a Prediction,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

pub fn render_predictions_json<'a, I>(rows: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a Prediction)>,
{
    let rows: Vec<PredictionRow<'a>> = rows
        .into_iter()
        .map(|(id, prediction)| PredictionRow { id, prediction })
        .collect();
    serde_json::to_string_pretty(&rows)
}
