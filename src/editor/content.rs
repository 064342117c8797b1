//! Storage encoding for note content.
//!
//! A note body is plain text with inline images written as
//! `[IMG:data:image/...]` markers. Strikethrough (`~~text~~`) is only a
//! display convention and survives the encoding untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[IMG:(data:image/[^\]]+)\]").expect("valid image marker regex"));
static STRIKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").expect("valid strike regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Inline image as a `data:image/...` URL.
    Image(String),
}

/// Encode segments into the single stored string.
pub fn serialize(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Image(data) => {
                out.push_str("[IMG:");
                out.push_str(data);
                out.push(']');
            }
        }
    }
    out
}

/// Split a stored string back into segments. Empty text between markers is
/// dropped, so adjacent images decode as adjacent `Image` segments.
pub fn deserialize(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for cap in IMAGE_RE.captures_iter(text) {
        let (Some(whole), Some(data)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_string()));
        }
        segments.push(Segment::Image(data.as_str().to_string()));
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
    segments
}

/// Every image data URL referenced by stored content.
pub fn image_urls(content: &str) -> impl Iterator<Item = &str> + '_ {
    IMAGE_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Merge adjacent text segments and drop empty ones.
pub fn normalize(segments: &[Segment]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Text(text) if text.is_empty() => {}
            Segment::Text(text) => {
                if let Some(Segment::Text(prev)) = out.last_mut() {
                    prev.push_str(text);
                } else {
                    out.push(Segment::Text(text.clone()));
                }
            }
            Segment::Image(data) => out.push(Segment::Image(data.clone())),
        }
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HTML for an editable surface: escaped text, images as marked `<img>` tags.
pub fn to_html(text: &str) -> String {
    deserialize(text)
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => escape_html(text),
            Segment::Image(data) => format!(
                r#"<img src="{}" class="editor-preview-image" data-image-marker="true">"#,
                escape_html(data)
            ),
        })
        .collect()
}

/// A run of display content for a note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySpan {
    Text { text: String, strike: bool },
    Image(String),
}

/// Display form of stored content: images split out, `~~pairs~~` struck.
///
/// Strike pairs are matched over the whole string, so a pair that wraps an
/// image strikes the text on both sides of it.
pub fn display_spans(content: &str) -> Vec<DisplaySpan> {
    let mut markers = Vec::new();
    let mut struck = Vec::new();
    for cap in STRIKE_RE.captures_iter(content) {
        let (Some(whole), Some(inner)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        markers.push(whole.start()..inner.start());
        markers.push(inner.end()..whole.end());
        struck.push(inner.range());
    }

    let mut spans = Vec::new();
    let mut last = 0;
    for cap in IMAGE_RE.captures_iter(content) {
        let (Some(whole), Some(data)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        push_text_spans(&mut spans, content, last..whole.start(), &markers, &struck);
        spans.push(DisplaySpan::Image(data.as_str().to_string()));
        last = whole.end();
    }
    push_text_spans(&mut spans, content, last..content.len(), &markers, &struck);
    spans
}

fn push_text_spans(
    spans: &mut Vec<DisplaySpan>,
    content: &str,
    range: Range<usize>,
    markers: &[Range<usize>],
    struck: &[Range<usize>],
) {
    let mut cuts = vec![range.start, range.end];
    for r in markers.iter().chain(struck) {
        cuts.extend([r.start, r.end].into_iter().filter(|p| range.contains(p)));
    }
    cuts.sort_unstable();
    cuts.dedup();

    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let inside = |r: &Range<usize>| r.start <= a && b <= r.end;
        if a == b || markers.iter().any(inside) {
            continue;
        }
        let strike = struck.iter().any(inside);
        let text = &content[a..b];
        match spans.last_mut() {
            Some(DisplaySpan::Text { text: prev, strike: s }) if *s == strike => prev.push_str(text),
            _ => spans.push(DisplaySpan::Text {
                text: text.to_string(),
                strike,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn deserialize_splits_text_and_images() {
        let text = format!("before [IMG:{PNG}] middle [IMG:{PNG}][IMG:{PNG}]");
        assert_eq!(
            deserialize(&text),
            vec![
                Segment::Text("before ".into()),
                Segment::Image(PNG.into()),
                Segment::Text(" middle ".into()),
                Segment::Image(PNG.into()),
                Segment::Image(PNG.into()),
            ]
        );
    }

    #[test]
    fn non_data_markers_stay_text() {
        let text = "[IMG:http://example.com/a.png]";
        assert_eq!(deserialize(text), vec![Segment::Text(text.into())]);
    }

    #[test]
    fn normalize_merges_text() {
        let segments = vec![
            Segment::Text("a".into()),
            Segment::Text(String::new()),
            Segment::Text("b".into()),
            Segment::Image(PNG.into()),
        ];
        assert_eq!(
            normalize(&segments),
            vec![Segment::Text("ab".into()), Segment::Image(PNG.into())]
        );
    }

    #[test]
    fn html_escapes_text_only() {
        let html = to_html(&format!("<b>&</b>[IMG:{PNG}]"));
        assert_eq!(
            html,
            format!(r#"&lt;b&gt;&amp;&lt;/b&gt;<img src="{PNG}" class="editor-preview-image" data-image-marker="true">"#)
        );
    }

    #[test]
    fn strikethrough_is_display_only() {
        let spans = display_spans("buy ~~milk~~ eggs ~~~~");
        assert_eq!(
            spans,
            vec![
                DisplaySpan::Text {
                    text: "buy ".into(),
                    strike: false
                },
                DisplaySpan::Text {
                    text: "milk".into(),
                    strike: true
                },
                DisplaySpan::Text {
                    text: " eggs ~~~~".into(),
                    strike: false
                },
            ]
        );
    }

    #[test]
    fn strike_pair_spans_an_image() {
        let spans = display_spans(&format!("x ~~a [IMG:{PNG}] b~~ y"));
        assert_eq!(
            spans,
            vec![
                DisplaySpan::Text {
                    text: "x ".into(),
                    strike: false
                },
                DisplaySpan::Text {
                    text: "a ".into(),
                    strike: true
                },
                DisplaySpan::Image(PNG.into()),
                DisplaySpan::Text {
                    text: " b".into(),
                    strike: true
                },
                DisplaySpan::Text {
                    text: " y".into(),
                    strike: false
                },
            ]
        );
    }

    #[test]
    fn image_urls_lists_every_marker() {
        let text = format!("a [IMG:{PNG}] b [IMG:data:image/gif;base64,R0lG]");
        let urls: Vec<_> = image_urls(&text).collect();
        assert_eq!(urls, vec![PNG, "data:image/gif;base64,R0lG"]);
    }
}
