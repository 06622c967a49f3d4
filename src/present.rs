use crate::backend::ScoredItem;
use crate::verdict::{Verdict, compute_verdict};
use serde::Serialize;

/// One rendered result: everything the output layer needs, already decided.
/// `payload` is untrusted text and is carried through verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayUnit {
    pub title: String,
    pub verdict: Verdict,
    pub percent: f64,
    pub payload: String,
    pub label: Option<String>,
}

/// Score one item for display. The percent indicator is clamped into
/// [0, 100] as a purely cosmetic guard against out-of-range backend values;
/// the verdict is always computed on the raw probability.
pub fn present(item: &ScoredItem, title: &str) -> DisplayUnit {
    let verdict = compute_verdict(item.prob_malicious, item.threshold);
    let percent = (item.prob_malicious * 100.0).clamp(0.0, 100.0);
    DisplayUnit {
        title: title.to_string(),
        verdict,
        percent,
        payload: item.payload.clone(),
        label: Some(item.label.clone()),
    }
}

pub fn present_single(item: &ScoredItem) -> DisplayUnit {
    present(item, "Payload Prediction")
}

pub fn present_scan(items: &[ScoredItem], qr_type_fallback: &str) -> Vec<DisplayUnit> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let qr_type = item.qr_type.as_deref().unwrap_or(qr_type_fallback);
            present(item, &format!("QR Image Scan #{} ({})", idx + 1, qr_type))
        })
        .collect()
}
