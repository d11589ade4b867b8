use async_trait::async_trait;
use cms_shared::{
    ButtonSection, CallToActionSection, Content, HeaderSection, Section, StatementSection,
    TextSection,
};
use pulldown_cmark::{html, Options, Parser};
use serde_json::{Map, Value};

use crate::db::{string_field, string_or_default};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Unknown content section type: {0}")]
    UnknownSection(String),

    #[error("Malformed content: {0}")]
    Malformed(String),
}

/// Turns a stored `content` field into a renderable body.
#[async_trait]
pub trait ContentParser: Send + Sync {
    async fn parse(&self, raw: Option<&Value>) -> Result<Content, ContentError>;
}

/// Parser for the stored shapes the CMS editor produces:
/// a markdown string or a list of typed sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownContentParser;

#[async_trait]
impl ContentParser for MarkdownContentParser {
    async fn parse(&self, raw: Option<&Value>) -> Result<Content, ContentError> {
        parse_content(raw)
    }
}

pub fn parse_content(raw: Option<&Value>) -> Result<Content, ContentError> {
    match raw {
        None | Some(Value::Null) => Ok(Content::Empty),
        Some(Value::String(source)) => Ok(Content::Markdown {
            html: render_markdown(source),
            source: source.clone(),
        }),
        Some(Value::Array(items)) => {
            let sections = items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(fields) => parse_section(fields),
                    other => Err(ContentError::Malformed(format!(
                        "section {} is not an object: {}",
                        index, other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Content::Sections { sections })
        }
        Some(other) => Err(ContentError::Malformed(format!(
            "expected markdown or a section list, got {}",
            other
        ))),
    }
}

fn parse_section(fields: &Map<String, Value>) -> Result<Section, ContentError> {
    let kind = string_field(fields, "type")
        .ok_or_else(|| ContentError::Malformed("section without a type".to_string()))?;
    let id = string_field(fields, "id");

    let section = match kind.as_str() {
        "header" => Section::Header(HeaderSection {
            id,
            value: string_or_default(fields, "value"),
        }),
        "text" => {
            let value = string_or_default(fields, "value");
            Section::Text(TextSection {
                id,
                html: render_markdown(&value),
                value,
            })
        }
        "call_to_action" => Section::CallToAction(CallToActionSection {
            id,
            class: string_or_default(fields, "class"),
            header: string_or_default(fields, "header"),
            text: string_field(fields, "text"),
            link_text: string_or_default(fields, "link_text"),
            link_href: string_or_default(fields, "link_href"),
        }),
        "statement" => Section::Statement(StatementSection {
            id,
            class: string_field(fields, "class"),
            header: string_or_default(fields, "header"),
            text: string_field(fields, "text"),
            footer: string_field(fields, "footer"),
        }),
        "button" => Section::Button(ButtonSection {
            id,
            link_text: string_or_default(fields, "link_text"),
            link_href: string_or_default(fields, "link_href"),
        }),
        _ => return Err(ContentError::UnknownSection(kind)),
    };

    Ok(section)
}

pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
