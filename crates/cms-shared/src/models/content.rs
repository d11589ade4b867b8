use serde::{Deserialize, Serialize};

/// Parsed page body. The variant follows the shape of the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    #[default]
    Empty,
    Markdown { source: String, html: String },
    Sections { sections: Vec<Section> },
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Markdown { source, .. } => source.trim().is_empty(),
            Self::Sections { sections } => sections.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    Header(HeaderSection),
    Text(TextSection),
    CallToAction(CallToActionSection),
    Statement(StatementSection),
    Button(ButtonSection),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Markdown source
    pub value: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToActionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub class: String,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub link_text: String,
    pub link_href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub link_text: String,
    pub link_href: String,
}
