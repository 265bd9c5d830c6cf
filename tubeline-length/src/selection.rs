//! Cross-estimator selection (§4.3.6): rank succeeding estimators by their
//! own confidence, then adjust the winner's confidence by how well the
//! estimators agree with each other.

use crate::{Estimate, LengthMethod, LengthResult};

pub fn select(candidates: &[(LengthMethod, Option<Estimate>)]) -> LengthResult {
    let mut succeeding: Vec<(LengthMethod, Estimate)> = candidates
        .iter()
        .filter_map(|(method, estimate)| estimate.map(|e| (*method, e)))
        .collect();

    if succeeding.is_empty() {
        return LengthResult {
            length: 0.0,
            method: LengthMethod::None,
            confidence: 0.0,
        };
    }

    succeeding.sort_by(|a, b| b.1.confidence.partial_cmp(&a.1.confidence).unwrap());
    let (winner_method, winner_estimate) = succeeding[0];
    let mut confidence = winner_estimate.confidence;

    let lengths: Vec<f64> = succeeding.iter().map(|(_, e)| e.length).collect();
    if let Some(cv) = coefficient_of_variation(&lengths) {
        if cv < 0.2 {
            confidence = (confidence + 0.1).min(0.95);
        } else if cv > 0.5 {
            confidence = (confidence - 0.2).max(0.1);
        }
    }

    LengthResult {
        length: winner_estimate.length,
        method: winner_method,
        confidence,
    }
}

fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.abs() < f64::EPSILON {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / mean)
}
