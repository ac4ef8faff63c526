//! Markdown Notes
//!
//! Renders ticket and installation notes with pulldown-cmark, plus:
//! - Color highlights: %r%urgent%r%
//! - Raw HTML in notes is shown as text, never injected
//! - Link targets with spaces are encoded; `javascript:` links are dropped

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Color codes and their hex values
const COLORS: &[(&str, &str)] = &[
    ("r", "#c0392b"), // red
    ("g", "#27ae60"), // green
    ("b", "#2980b9"), // blue
    ("o", "#e67e22"), // orange
];

const LINK_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Render markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    for event in parser {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: CowStr::from(safe_url(&dest_url)),
                    title,
                    id,
                }));
            }
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                events.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url: CowStr::from(safe_url(&dest_url)),
                    title,
                    id,
                }));
            }
            Event::Text(text) if contains_color(&text) => events.extend(color_events(&text)),
            other => events.push(other),
        }
    }
    events
}

fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return "#".to_string();
    }
    utf8_percent_encode(trimmed, LINK_ENCODE_SET).to_string()
}

fn contains_color(text: &str) -> bool {
    COLORS.iter().any(|(code, _)| text.contains(&format!("%{}%", code)))
}

fn color_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text.to_string();

    while !remaining.is_empty() {
        // Earliest color marker in what is left
        let next = COLORS
            .iter()
            .filter_map(|(code, color)| {
                let pattern = format!("%{}%", code);
                remaining.find(&pattern).map(|pos| (pos, pattern, *color))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, pattern, color)) = next else {
            events.push(Event::Text(CowStr::from(remaining)));
            break;
        };
        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        remaining = remaining[pos + pattern.len()..].to_string();
        match remaining.find(&pattern) {
            Some(end) => {
                events.push(Event::Html(CowStr::from(format!("<span style=\"color: {}\">", color))));
                if end > 0 {
                    events.push(Event::Text(CowStr::from(remaining[..end].to_string())));
                }
                events.push(Event::Html(CowStr::from("</span>")));
                remaining = remaining[end + pattern.len()..].to_string();
            }
            None => events.push(Event::Text(CowStr::from(pattern))),
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("**Gas refilled**\n\n- [x] filter cleaned");
        assert!(html.contains("<strong>Gas refilled</strong>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_colors() {
        let html = parse_markdown("compressor %r%failed%r% again");
        assert!(html.contains("<span style=\"color: #c0392b\">failed</span>"));
        let html = parse_markdown("discount %g% unclosed");
        assert!(html.contains("%g%"));
    }

    #[test]
    fn test_links() {
        let html = parse_markdown("[bad](javascript:alert(1)) [doc](<site photos/roof.jpg>)");
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("site%20photos/roof.jpg"));
    }
}
