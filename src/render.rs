use crate::config::Config;
use crate::present::{DisplayUnit, present_scan, present_single};
use crate::session::{SessionResult, SessionState};
use crate::util::now_rfc3339;
use crate::verdict::{PresentationStyle, style_for};
use anyhow::{Result, anyhow};

pub const NO_QR_MESSAGE: &str = "No QR code detected in the image.";

const BAR_WIDTH: usize = 20;

/// Write a succeeded session to stdout. `Idle`/`Submitting` print nothing and
/// `Failed` is surfaced once at the CLI boundary, so both are no-ops here.
pub fn emit(cfg: &Config, state: &SessionState) -> Result<()> {
    let SessionState::Succeeded(result) = state else {
        return Ok(());
    };
    print!("{}", render_result(cfg, result)?);
    Ok(())
}

/// Render a succeeded result in the configured output format.
pub fn render_result(cfg: &Config, result: &SessionResult) -> Result<String> {
    match cfg.output.format.as_str() {
        "text" => Ok(render_text(cfg, result)),
        "json" => render_json(cfg, result),
        other => Err(anyhow!("unknown output.format: {other}")),
    }
}

fn units_for(cfg: &Config, result: &SessionResult) -> Vec<DisplayUnit> {
    match result {
        SessionResult::Single(item) => vec![present_single(item)],
        SessionResult::Scan(items) => present_scan(items, &cfg.display.qr_type_fallback),
    }
}

fn render_text(cfg: &Config, result: &SessionResult) -> String {
    if let SessionResult::Scan(items) = result {
        if items.is_empty() {
            return format!("{NO_QR_MESSAGE}\n");
        }
    }
    units_for(cfg, result)
        .iter()
        .map(|unit| render_unit(unit, cfg.display.color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(cfg: &Config, result: &SessionResult) -> Result<String> {
    let units = units_for(cfg, result);
    let mut doc = serde_json::json!({
        "checked_at": now_rfc3339(),
        "results": units,
    });
    if matches!(result, SessionResult::Scan(items) if items.is_empty()) {
        doc["message"] = serde_json::Value::String(NO_QR_MESSAGE.to_string());
    }
    Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
}

/// One result card: title, verdict badge, percent bar, payload, label line.
/// The payload is printed verbatim as plain text.
pub fn render_unit(unit: &DisplayUnit, color: bool) -> String {
    let style = style_for(unit.verdict);
    let badge = badge(unit.verdict.as_str(), style, color);

    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", unit.title));
    out.push_str(&format!("{badge}  {:.1}%\n", unit.percent));
    out.push_str(&format!("[{}]\n", percent_bar(unit.percent)));
    out.push_str("Decoded payload:\n");
    for line in unit.payload.lines() {
        out.push_str(&format!("  {line}\n"));
    }
    if unit.payload.is_empty() {
        out.push_str("  (empty)\n");
    }
    if let Some(label) = &unit.label {
        out.push_str(&format!("Model output label: {label}\n"));
    }
    out
}

fn percent_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut bar = "#".repeat(filled);
    bar.push_str(&".".repeat(BAR_WIDTH - filled));
    bar
}

fn badge(text: &str, style: &PresentationStyle, color: bool) -> String {
    if !color {
        return format!("[{text}]");
    }
    match (hex_rgb(style.badge_bg), hex_rgb(style.badge_text)) {
        (Some((br, bg, bb)), Some((fr, fg, fb))) => format!(
            "\x1b[48;2;{br};{bg};{bb}m\x1b[38;2;{fr};{fg};{fb}m {text} \x1b[0m"
        ),
        _ => format!("[{text}]"),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
