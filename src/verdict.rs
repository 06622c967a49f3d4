use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Malicious,
    Benign,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Malicious => "MALICIOUS",
            Verdict::Benign => "BENIGN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the binary verdict from the backend-supplied probability and
/// threshold. Equal-to-threshold counts as malicious. Out-of-range inputs are
/// compared arithmetically, not rejected; any clamping is display-only and
/// happens in the presenter.
pub fn compute_verdict(prob_malicious: f64, threshold: f64) -> Verdict {
    if prob_malicious >= threshold {
        Verdict::Malicious
    } else {
        Verdict::Benign
    }
}

/// Fixed color record for one verdict, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationStyle {
    pub bg: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub badge_bg: &'static str,
    pub badge_text: &'static str,
}

const MALICIOUS_STYLE: PresentationStyle = PresentationStyle {
    bg: "#FEE2E2",
    border: "#EF4444",
    text: "#991B1B",
    badge_bg: "#EF4444",
    badge_text: "#FFFFFF",
};

const BENIGN_STYLE: PresentationStyle = PresentationStyle {
    bg: "#DCFCE7",
    border: "#22C55E",
    text: "#166534",
    badge_bg: "#22C55E",
    badge_text: "#FFFFFF",
};

pub fn style_for(verdict: Verdict) -> &'static PresentationStyle {
    match verdict {
        Verdict::Malicious => &MALICIOUS_STYLE,
        Verdict::Benign => &BENIGN_STYLE,
    }
}
