use crate::report::{ClassStat, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Skin Lesion Prediction Calibration Report\n");
    out.push_str("=========================================\n\n");

    out.push_str("1. Calibration\n");
    let cal = &data.calibration;
    out.push_str(&format!("Profile: {}\n", cal.profile));
    out.push_str(&format!("Temperature: {}\n", format_f64_6(cal.temperature)));
    out.push_str(&format!("Top-N: {}\n", cal.top_n));
    if cal.rebalance {
        out.push_str(&format!(
            "Class rebalancing: on (majority class: {})\n",
            cal.majority_class.as_deref().unwrap_or("none")
        ));
        let parts: Vec<String> = cal
            .multipliers
            .iter()
            .map(|(code, m)| format!("{code}=x{m}"))
            .collect();
        out.push_str(&format!("Multipliers: {}\n\n", parts.join(", ")));
    } else {
        out.push_str("Class rebalancing: off\n\n");
    }

    out.push_str("2. Predicted classes\n");
    out.push_str(&format!("Records: {}\n", data.n_records));
    for c in &data.classes {
        out.push_str(&format!(
            "{} ({}): {} ({})\n",
            c.code,
            c.label,
            c.count,
            format_f64_6(c.fraction)
        ));
    }
    out.push_str(&format!("Dominant classes: {}\n\n", dominant_classes(&data.classes)));

    out.push_str("3. Confidence and caveats\n");
    out.push_str(&format!(
        "Confidence median: {}%\nConfidence p10: {}%\n",
        format_f64_6(data.confidence_median),
        format_f64_6(data.confidence_p10)
    ));
    for f in &data.flags {
        out.push_str(&format!("{} fraction: {}\n", f.name, format_f64_6(f.fraction)));
    }
    out.push_str(
        "Note: probabilities are post-hoc corrected model outputs, not a diagnosis.\n",
    );

    out
}

fn dominant_classes(classes: &[ClassStat]) -> String {
    let mut sorted: Vec<&ClassStat> = classes.iter().filter(|c| c.count > 0).collect();
    // stable: catalog order among equal counts
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    let parts: Vec<String> = sorted
        .iter()
        .take(2)
        .map(|c| format!("{} ({})", c.code, format_f64_6(c.fraction)))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}
