use serde::{Deserialize, Deserializer, Serialize};

/// One classified payload as returned by the scoring service. The payload is
/// attacker-controlled text and must only ever be rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub payload: String,
    pub prob_malicious: f64,
    pub threshold: f64,
    #[serde(deserialize_with = "label_as_string")]
    pub label: String,
    #[serde(default)]
    pub qr_type: Option<String>,
}

/// `results` defaults to empty: some service versions answer a no-QR image
/// with HTTP 200 and an error body instead of an empty array, and both mean
/// "no QR code detected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOut {
    #[serde(default)]
    pub results: Vec<ScoredItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthOut {
    pub ok: bool,
    pub model_loaded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// The reference model service emits integer labels (1 = malicious); other
// deployments send strings. Accept both and keep the string form for display.
fn label_as_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "label must be a string or number, got: {other}"
        ))),
    }
}
