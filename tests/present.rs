use qr_check::backend::ScoredItem;
use qr_check::present::{present, present_scan, present_single};
use qr_check::render::render_unit;
use qr_check::verdict::Verdict;

fn item(prob: f64, threshold: f64) -> ScoredItem {
    ScoredItem {
        payload: "http://evil.example/login".to_string(),
        prob_malicious: prob,
        threshold,
        label: "phish".to_string(),
        qr_type: None,
    }
}

#[test]
fn malicious_item_presents_with_percent() {
    let unit = present_single(&item(0.92, 0.5));
    assert_eq!(unit.title, "Payload Prediction");
    assert_eq!(unit.verdict, Verdict::Malicious);
    assert_eq!(unit.percent, 92.0);
    assert_eq!(unit.payload, "http://evil.example/login");
    assert_eq!(unit.label.as_deref(), Some("phish"));
}

#[test]
fn benign_item_presents_with_percent() {
    let unit = present_single(&item(0.12, 0.5));
    assert_eq!(unit.verdict, Verdict::Benign);
    assert_eq!(unit.percent, 12.0);
}

#[test]
fn percent_clamp_never_touches_the_verdict() {
    // prob > 1 clamps to 100% for display but still loses to a higher
    // threshold in the decision.
    let unit = present(&item(1.5, 2.0), "x");
    assert_eq!(unit.percent, 100.0);
    assert_eq!(unit.verdict, Verdict::Benign);

    let unit = present(&item(-0.5, 0.5), "x");
    assert_eq!(unit.percent, 0.0);
    assert_eq!(unit.verdict, Verdict::Benign);

    let unit = present(&item(1.5, 1.2), "x");
    assert_eq!(unit.percent, 100.0);
    assert_eq!(unit.verdict, Verdict::Malicious);
}

#[test]
fn scan_titles_are_numbered_with_qr_type_fallback() {
    let mut tagged = item(0.8, 0.5);
    tagged.qr_type = Some("MICROQR".to_string());
    let untagged = item(0.3, 0.5);

    let units = present_scan(&[tagged, untagged], "QRCODE");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].title, "QR Image Scan #1 (MICROQR)");
    assert_eq!(units[0].verdict, Verdict::Malicious);
    assert_eq!(units[1].title, "QR Image Scan #2 (QRCODE)");
    assert_eq!(units[1].verdict, Verdict::Benign);
}

#[test]
fn empty_scan_presents_no_units() {
    assert!(present_scan(&[], "QRCODE").is_empty());
}

#[test]
fn payload_is_rendered_verbatim_as_plain_text() {
    let mut it = item(0.9, 0.5);
    it.payload = "<script>alert(1)</script> **bold**".to_string();
    let card = render_unit(&present_single(&it), false);
    assert!(card.contains("<script>alert(1)</script> **bold**"));
}

#[test]
fn rendered_bar_stays_within_bounds() {
    let card = render_unit(&present(&item(7.0, 0.5), "x"), false);
    // Clamped to 100%: a full 20-cell bar, no overflow.
    assert!(card.contains("[####################]"));
    assert!(card.contains("100.0%"));

    let card = render_unit(&present(&item(0.0, 0.5), "x"), false);
    assert!(card.contains("[....................]"));
}
