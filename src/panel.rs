// Info panel markup for a picked object.

use viewer_core::constants::NO_ATTRIBUTES_PLACEHOLDER;
use viewer_core::PickReport;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Panel heading text (not escaped; set as text content).
pub fn title_text(report: &PickReport) -> &str {
    report.display_name()
}

/// One `<li>` per attribute, or the placeholder line when there are none.
pub fn attributes_html(report: &PickReport) -> String {
    if !report.has_attributes() {
        return format!(
            "<li class=\"empty\">{}</li>",
            escape_html(NO_ATTRIBUTES_PLACEHOLDER)
        );
    }
    report
        .attributes
        .iter()
        .map(|(k, v)| {
            format!(
                "<li><span class=\"key\">{}</span><span class=\"value\">{}</span></li>",
                escape_html(k),
                escape_html(v)
            )
        })
        .collect()
}
