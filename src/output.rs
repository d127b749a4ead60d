use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::movie::Movie;

/// What a command produced. The session decides how it reaches the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Plain(String),
    Html(String),
    /// nothing to show (a successful `cd`)
    Silent,
    ClearTranscript,
    Takeover(Takeover),
}

impl Output {
    pub fn plain(text: impl Into<String>) -> Self {
        Output::Plain(text.into())
    }

    pub fn html(markup: impl Into<String>) -> Self {
        Output::Html(markup.into())
    }
}

/// Full-screen modes that replace the transcript until the exit gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Takeover {
    Snake,
    Movie(Movie),
}

/// One unit of the visible transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum OutputEntry {
    /// the prompt line echoed for a submitted input
    Echo { prompt: String, input: String },
    Plain(String),
    Html(String),
}

impl OutputEntry {
    /// Markup that is safe to hand to the display surface as-is.
    pub fn to_html(&self) -> String {
        match self {
            OutputEntry::Echo { prompt, input } => {
                format!("{} {}", escape_html(prompt), escape_html(input))
            }
            OutputEntry::Plain(text) => escape_html(text).replace('\n', "<br />"),
            OutputEntry::Html(markup) => sanitize_html(markup),
        }
    }

    /// Tag-free text, for terminals that can't render markup.
    pub fn to_text(&self) -> String {
        match self {
            OutputEntry::Echo { prompt, input } => format!("{} {}", prompt, input),
            OutputEntry::Plain(text) => text.clone(),
            OutputEntry::Html(markup) => html_to_text(&sanitize_html(markup)),
        }
    }
}

/// How the host should treat an output value.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Append(OutputEntry),
    Clear,
    EnterTakeover(Takeover),
    Nothing,
}

pub fn present(output: Output) -> Presentation {
    match output {
        Output::Plain(text) if text.is_empty() => Presentation::Nothing,
        Output::Plain(text) => Presentation::Append(OutputEntry::Plain(text)),
        Output::Html(markup) => Presentation::Append(OutputEntry::Html(markup)),
        Output::Silent => Presentation::Nothing,
        Output::ClearTranscript => Presentation::Clear,
        Output::Takeover(takeover) => Presentation::EnterTakeover(takeover),
    }
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
            c => out.push(c),
        }
    }
    out
}

const ALLOWED_TAGS: &[&str] = &["a", "br", "b", "i", "em", "strong", "span", "p", "pre", "code", "ul", "li"];
const ALLOWED_ATTRS: &[&str] = &["href", "target", "rel", "class"];

fn blocks_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").expect("static regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^<>]*)>").expect("static regex"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).expect("static regex")
    })
}

/// Allowlist sanitizer for authored HTML. Unknown tags are stripped (their
/// text stays), script/style blocks go entirely, and only a handful of
/// attributes survive.
pub fn sanitize_html(markup: &str) -> String {
    let without_blocks = blocks_re().replace_all(markup, "");
    tag_re()
        .replace_all(&without_blocks, |caps: &regex::Captures| {
            let closing = !caps[1].is_empty();
            let tag = caps[2].to_ascii_lowercase();
            if !ALLOWED_TAGS.contains(&tag.as_str()) {
                return String::new();
            }
            if closing {
                return format!("</{}>", tag);
            }
            let raw_attrs = &caps[3];
            let mut rebuilt = format!("<{}", tag);
            for attr in attr_re().captures_iter(raw_attrs) {
                let name = attr[1].to_ascii_lowercase();
                if !ALLOWED_ATTRS.contains(&name.as_str()) {
                    continue;
                }
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                if name == "href" && value.trim().to_ascii_lowercase().starts_with("javascript:") {
                    continue;
                }
                rebuilt.push_str(&format!(" {}=\"{}\"", name, value.replace('"', "&quot;")));
            }
            if raw_attrs.trim_end().ends_with('/') {
                rebuilt.push_str(" />");
            } else {
                rebuilt.push('>');
            }
            rebuilt
        })
        .into_owned()
}

fn html_to_text(markup: &str) -> String {
    let with_breaks = markup.replace("<br />", "\n").replace("<br/>", "\n").replace("<br>", "\n");
    let stripped = tag_re().replace_all(&with_breaks, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
