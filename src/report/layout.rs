/// Report text layout
///
/// Turns the flat field map into styled lines. Known fields are grouped into
/// sections; anything else is listed under "Additional Fields" so no field
/// the source produced is dropped from the report.
use super::{CONFIRMATION_STATUS_KEY, REVIEWER_NAME_KEY};
use crate::config::ReportSettings;
use crate::utils::{to_printable_ascii, wrap_text};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const REPORT_TITLE: &str = "SPL Token Security Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: to_printable_ascii(&text.into()),
        }
    }

    fn blank() -> Self {
        Self {
            style: LineStyle::Blank,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    /// `null` means the authority was revoked
    Authority,
    Flag,
    Count,
    Percent,
    Usd,
}

const TOKEN_FIELDS: &[(&str, &str, FieldKind)] = &[
    ("name", "Name", FieldKind::Text),
    ("symbol", "Symbol", FieldKind::Text),
    ("address", "Address", FieldKind::Text),
    ("token_program", "Token program", FieldKind::Text),
    ("token_type", "Token type", FieldKind::Text),
    ("decimals", "Decimals", FieldKind::Count),
    ("supply", "Raw supply", FieldKind::Count),
    ("description", "Description", FieldKind::Text),
];

const SECURITY_FIELDS: &[(&str, &str, FieldKind)] = &[
    ("risk_level", "Risk level", FieldKind::Text),
    ("score_normalised", "Normalised score", FieldKind::Count),
    ("score", "Raw score", FieldKind::Count),
    ("rugged", "Rugged", FieldKind::Flag),
    ("mint_authority", "Mint authority", FieldKind::Authority),
    ("freeze_authority", "Freeze authority", FieldKind::Authority),
    ("update_authority", "Update authority", FieldKind::Authority),
    ("mutable_metadata", "Mutable metadata", FieldKind::Flag),
    ("transfer_fee_pct", "Transfer fee", FieldKind::Percent),
    ("creator", "Creator", FieldKind::Text),
    ("creator_balance", "Creator balance", FieldKind::Count),
    ("graph_insiders_detected", "Insider wallets", FieldKind::Count),
];

const MARKET_FIELDS: &[(&str, &str, FieldKind)] = &[
    ("price_usd", "Price", FieldKind::Usd),
    ("total_market_liquidity_usd", "Market liquidity", FieldKind::Usd),
    ("total_stable_liquidity_usd", "Stable liquidity", FieldKind::Usd),
    ("market_count", "Markets", FieldKind::Count),
    ("max_lp_locked_pct", "Max LP locked", FieldKind::Percent),
    ("total_lp_providers", "LP providers", FieldKind::Count),
    ("total_holders", "Holders", FieldKind::Count),
    ("detected_at", "First detected", FieldKind::Text),
    ("analyzed_at", "Analyzed at", FieldKind::Text),
    ("data_source", "Data source", FieldKind::Text),
];

const RISKS_KEY: &str = "risks";
const TOP_HOLDERS_KEY: &str = "top_holders";

/// Lay out the report for `fields`
///
/// `generated_at` is printed in the review block as given.
pub fn build_report_lines(
    fields: &Map<String, Value>,
    settings: &ReportSettings,
    generated_at: &str,
) -> Vec<ReportLine> {
    let width = settings.line_width.max(20);
    let mut used: HashSet<&str> = HashSet::new();
    let mut lines = vec![ReportLine::new(LineStyle::Title, REPORT_TITLE), ReportLine::blank()];

    push_section(&mut lines, "Token", fields, TOKEN_FIELDS, &mut used, width);

    lines.push(ReportLine::new(LineStyle::Heading, "Review"));
    for (key, label) in [
        (REVIEWER_NAME_KEY, "Reviewer"),
        (CONFIRMATION_STATUS_KEY, "Confirmation status"),
    ] {
        used.insert(key);
        let value = fields
            .get(key)
            .map(|v| format_value(v, FieldKind::Text))
            .unwrap_or_else(|| "n/a".to_string());
        push_wrapped(&mut lines, &format!("{}: {}", label, value), width);
    }
    push_wrapped(&mut lines, &format!("Generated at: {}", generated_at), width);
    lines.push(ReportLine::blank());

    push_section(&mut lines, "Security Summary", fields, SECURITY_FIELDS, &mut used, width);
    push_section(&mut lines, "Market & Holders", fields, MARKET_FIELDS, &mut used, width);

    if let Some(Value::Array(risks)) = fields.get(RISKS_KEY) {
        used.insert(RISKS_KEY);
        push_risks(&mut lines, risks, settings.max_risks, width);
    }

    if let Some(Value::Array(holders)) = fields.get(TOP_HOLDERS_KEY) {
        used.insert(TOP_HOLDERS_KEY);
        push_top_holders(&mut lines, holders, settings.max_top_holders, width);
    }

    let remaining: Vec<(&String, &Value)> = fields
        .iter()
        .filter(|(key, _)| !used.contains(key.as_str()))
        .collect();
    if !remaining.is_empty() {
        lines.push(ReportLine::new(LineStyle::Heading, "Additional Fields"));
        for (key, value) in remaining {
            push_wrapped(
                &mut lines,
                &format!("{}: {}", key, format_value(value, FieldKind::Text)),
                width,
            );
        }
        lines.push(ReportLine::blank());
    }

    while lines.last().map_or(false, |l| l.style == LineStyle::Blank) {
        lines.pop();
    }
    lines
}

fn push_section<'a>(
    lines: &mut Vec<ReportLine>,
    heading: &str,
    fields: &Map<String, Value>,
    known: &[(&'a str, &str, FieldKind)],
    used: &mut HashSet<&'a str>,
    width: usize,
) {
    let present: Vec<_> = known
        .iter()
        .filter(|(key, _, _)| fields.contains_key(*key))
        .collect();
    if present.is_empty() {
        return;
    }

    lines.push(ReportLine::new(LineStyle::Heading, heading));
    for (key, label, kind) in present {
        used.insert(*key);
        let value = format_value(&fields[*key], *kind);
        push_wrapped(lines, &format!("{}: {}", label, value), width);
    }
    lines.push(ReportLine::blank());
}

fn push_risks(lines: &mut Vec<ReportLine>, risks: &[Value], max: usize, width: usize) {
    lines.push(ReportLine::new(
        LineStyle::Heading,
        format!("Risks ({})", risks.len()),
    ));
    if risks.is_empty() {
        push_wrapped(lines, "No risks reported.", width);
    }
    for risk in risks.iter().take(max) {
        let level = str_field(risk, "level").to_uppercase();
        let name = str_field(risk, "name");
        let mut text = if level.is_empty() {
            format!("- {}", name)
        } else {
            format!("- [{}] {}", level, name)
        };
        if let Some(score) = risk.get("score").and_then(Value::as_i64) {
            text.push_str(&format!(" (score {})", score));
        }
        let value = str_field(risk, "value");
        if !value.is_empty() {
            text.push_str(&format!(" = {}", value));
        }
        let description = str_field(risk, "description");
        if !description.is_empty() {
            text.push_str(&format!(": {}", description));
        }
        push_wrapped(lines, &text, width);
    }
    if risks.len() > max {
        push_wrapped(lines, &format!("... and {} more", risks.len() - max), width);
    }
    lines.push(ReportLine::blank());
}

fn push_top_holders(lines: &mut Vec<ReportLine>, holders: &[Value], max: usize, width: usize) {
    if holders.is_empty() {
        return;
    }
    lines.push(ReportLine::new(
        LineStyle::Heading,
        format!("Top Holders (showing {} of {})", holders.len().min(max), holders.len()),
    ));
    for (index, holder) in holders.iter().take(max).enumerate() {
        let pct = holder.get("pct").and_then(Value::as_f64).unwrap_or(0.0);
        let insider = holder.get("insider").and_then(Value::as_bool).unwrap_or(false);
        let mut text = format!(
            "{:>2}. {} {:>7.2}%",
            index + 1,
            str_field(holder, "address"),
            pct
        );
        if insider {
            text.push_str(" [insider]");
        }
        push_wrapped(lines, &text, width);
    }
    lines.push(ReportLine::blank());
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Wrap one logical line; continuation lines are indented by two spaces
fn push_wrapped(lines: &mut Vec<ReportLine>, text: &str, width: usize) {
    let mut chunks = wrap_text(text, width).into_iter();
    if let Some(first) = chunks.next() {
        lines.push(ReportLine::new(LineStyle::Body, first));
    }
    let rest: String = chunks.collect::<Vec<_>>().join(" ");
    if !rest.is_empty() {
        for chunk in wrap_text(&rest, width - 2) {
            lines.push(ReportLine::new(LineStyle::Body, format!("  {}", chunk)));
        }
    }
}

fn format_value(value: &Value, kind: FieldKind) -> String {
    match (value, kind) {
        (Value::Null, FieldKind::Authority) => "None (revoked)".to_string(),
        (Value::Null, _) => "n/a".to_string(),
        (Value::Bool(flag), _) => (if *flag { "Yes" } else { "No" }).to_string(),
        (Value::Number(n), FieldKind::Percent) => match n.as_f64() {
            Some(pct) => format!("{:.2}%", pct),
            None => n.to_string(),
        },
        (Value::Number(n), FieldKind::Usd) => match n.as_f64() {
            Some(usd) if usd.abs() >= 1.0 => format!("${}", group_thousands(&format!("{:.2}", usd))),
            Some(usd) => format!("${:.8}", usd),
            None => n.to_string(),
        },
        (Value::Number(n), FieldKind::Count) => group_thousands(&n.to_string()),
        (Value::Number(n), _) => n.to_string(),
        (Value::String(s), _) if s.is_empty() => "n/a".to_string(),
        (Value::String(s), _) => s.clone(),
        (other, _) => other.to_string(),
    }
}

/// Insert `,` separators into the integer part of a plain decimal number
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return number.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines_for(value: Value) -> Vec<ReportLine> {
        build_report_lines(
            value.as_object().unwrap(),
            &ReportSettings::default(),
            "2026-10-16 12:00:00",
        )
    }

    fn texts(lines: &[ReportLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_minimal_record_lists_every_field() {
        let lines = lines_for(json!({
            "name": "XYZ",
            "risk": "low",
            "reviewer_name": "SPL-AUTOMATION",
            "confirmation_status": "Confirmed"
        }));
        let texts = texts(&lines);

        assert_eq!(lines[0].style, LineStyle::Title);
        assert_eq!(texts[0], REPORT_TITLE);
        assert!(texts.contains(&"Name: XYZ"));
        assert!(texts.contains(&"Reviewer: SPL-AUTOMATION"));
        assert!(texts.contains(&"Confirmation status: Confirmed"));
        assert!(texts.contains(&"Generated at: 2026-10-16 12:00:00"));
        assert!(texts.contains(&"Additional Fields"));
        assert!(texts.contains(&"risk: low"));
        assert_ne!(lines.last().unwrap().style, LineStyle::Blank);
    }

    #[test]
    fn test_security_fields_are_formatted() {
        let lines = lines_for(json!({
            "mint_authority": null,
            "freeze_authority": "Frz1",
            "rugged": false,
            "transfer_fee_pct": 1.5,
            "total_holders": 912345,
            "total_market_liquidity_usd": 1523000.5
        }));
        let texts = texts(&lines);

        assert!(texts.contains(&"Mint authority: None (revoked)"));
        assert!(texts.contains(&"Freeze authority: Frz1"));
        assert!(texts.contains(&"Rugged: No"));
        assert!(texts.contains(&"Transfer fee: 1.50%"));
        assert!(texts.contains(&"Holders: 912,345"));
        assert!(texts.contains(&"Market liquidity: $1,523,000.50"));
        assert!(!texts.contains(&"Additional Fields"));
    }

    #[test]
    fn test_risks_are_capped() {
        let risks: Vec<Value> = (0..5)
            .map(|i| json!({"name": format!("Risk {}", i), "level": "warn", "score": 100 - i, "value": "", "description": ""}))
            .collect();
        let settings = ReportSettings {
            max_risks: 2,
            ..ReportSettings::default()
        };
        let fields = json!({ "risks": risks });
        let lines = build_report_lines(fields.as_object().unwrap(), &settings, "now");
        let texts = texts(&lines);

        assert!(texts.contains(&"Risks (5)"));
        assert!(texts.contains(&"- [WARN] Risk 0 (score 100)"));
        assert!(texts.contains(&"- [WARN] Risk 1 (score 99)"));
        assert!(!texts.iter().any(|t| t.contains("Risk 2")));
        assert!(texts.contains(&"... and 3 more"));
    }

    #[test]
    fn test_top_holders_section() {
        let lines = lines_for(json!({
            "top_holders": [
                {"address": "h1", "owner": null, "pct": 4.2, "insider": false},
                {"address": "h2", "owner": "o", "pct": 3.125, "insider": true}
            ]
        }));
        let texts = texts(&lines);

        assert!(texts.contains(&"Top Holders (showing 2 of 2)"));
        assert!(texts.contains(&" 1. h1    4.20%"));
        assert!(texts.contains(&" 2. h2    3.12% [insider]") || texts.contains(&" 2. h2    3.13% [insider]"));
    }

    #[test]
    fn test_long_values_wrap_within_width() {
        let settings = ReportSettings {
            line_width: 30,
            ..ReportSettings::default()
        };
        let fields = json!({ "description": "word ".repeat(40) });
        let lines = build_report_lines(fields.as_object().unwrap(), &settings, "now");

        assert!(lines.iter().all(|l| l.text.chars().count() <= 30));
        let continuation = lines.iter().filter(|l| l.text.starts_with("  word")).count();
        assert!(continuation > 1);
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        let lines = lines_for(json!({ "name": "Doge 🐶" }));
        assert!(texts(&lines).contains(&"Name: Doge ?"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1234.50"), "-1,234.50");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1e21"), "1e21");
    }
}
