pub mod dashboard;
pub mod form;

use crate::models::GeneratedImage;
use crate::prompt;

/// Caption shown under a rendered result.
pub(crate) fn caption(topic: &str, style: &str) -> String {
    format!("Resultado: {} ({})", topic.trim(), style)
}

/// Inline data URI for embedding a rendered image without persisting it.
pub(crate) fn data_uri(image: &GeneratedImage) -> String {
    format!("data:image/png;base64,{}", image.to_base64())
}

/// Minimal HTML escaping for user-echoed text.
pub(crate) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<option>` list for the style selector, marking the chosen label.
pub(crate) fn style_options(selected: &str) -> String {
    prompt::STYLES
        .iter()
        .map(|style| {
            let marker = if style.label == selected {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{label}\"{marker}>{label}</option>",
                label = escape_html(style.label),
                marker = marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
