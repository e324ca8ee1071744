pub fn sum_f64(values: &[f64]) -> f64 {
    let mut sum = 0f64;
    for &v in values {
        sum += v;
    }
    sum
}

pub fn max_f64(values: &[f64]) -> f64 {
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v > max {
            max = v;
        }
    }
    if max.is_finite() { max } else { 0.0 }
}

/// Index of the largest value; the lowest index wins ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Shannon entropy scaled by ln(n), so a uniform vector scores 1.0.
pub fn normalized_entropy(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum = sum_f64(values);
    if sum <= 0.0 {
        return 0.0;
    }
    let mut h = 0f64;
    for &v in values {
        let p = v / sum;
        if p > 0.0 {
            h -= p * p.ln();
        }
    }
    h / (values.len() as f64).ln()
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}
