//! Content sections and the items inside them.

use super::scalar::{lenient_opt_text, lenient_text, lenient_text_list};
use super::{Scalar, StyleRules};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A top-level block of the document, dispatched on its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentSection {
    /// Highlighted summary followed by a divider
    Abstract(AbstractBlock),
    /// Numbered or unnumbered body section
    Section(Section),
    /// Reference list that citation markers point into
    Bibliography(Bibliography),
    /// Any other tag; skipped when rendering
    Unknown {
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbstractBlock {
    #[serde(deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(deserialize_with = "lenient_text")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Optional number shown as `"{number}. {heading}"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Scalar>,
    #[serde(deserialize_with = "lenient_text")]
    pub heading: String,
    pub content: Vec<ContentItem>,
    /// Selector rules appended to the page style sheet when this section renders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_style: Option<StyleRules>,
}

impl Section {
    /// Heading text with the numeric prefix applied.
    pub fn display_heading(&self) -> String {
        match self.number.as_ref().filter(|n| n.is_truthy()) {
            Some(number) => format!("{}. {}", number, self.heading),
            None => self.heading.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bibliography {
    #[serde(deserialize_with = "lenient_text")]
    pub heading: String,
    pub entries: Vec<BibEntry>,
}

/// One reference. `id` is the key citation markers use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BibEntry {
    pub id: Option<Scalar>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BibEntry {
    /// The id as it appears in markers and anchors (`ref-{id}`).
    pub fn key(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Link target, if one is present and non-empty.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// A unit inside a [`Section`], dispatched on its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Paragraph {
        text: String,
    },
    Subheader {
        text: String,
    },
    Definition {
        term: String,
        def: String,
    },
    List {
        items: Vec<String>,
    },
    Blockquote {
        text: String,
    },
    Image(ImageItem),
    /// Any other tag; skipped when rendering
    Unknown {
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    },
}

/// Figure description. Which reference field is consulted depends on the
/// render's image policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageItem {
    #[serde(deserialize_with = "lenient_text")]
    pub alt: String,
    #[serde(deserialize_with = "lenient_text")]
    pub caption: String,
    #[serde(deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TextFields {
    #[serde(deserialize_with = "lenient_text")]
    text: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DefinitionFields {
    #[serde(deserialize_with = "lenient_text")]
    term: String,
    #[serde(deserialize_with = "lenient_text")]
    def: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ListFields {
    #[serde(deserialize_with = "lenient_text_list")]
    items: Vec<String>,
}

fn tag_of(value: &Value) -> Option<String> {
    value.get("type").and_then(Value::as_str).map(str::to_string)
}

fn fields<T: DeserializeOwned, E: serde::de::Error>(value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(E::custom)
}

// Tags are matched by hand so that a missing or unrecognized `type`, or an
// entry that is not an object at all, lands in `Unknown` instead of failing
// the whole document.
impl<'de> Deserialize<'de> for ContentSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let tag = tag_of(&value);
        Ok(match tag.as_deref() {
            Some("abstract") => ContentSection::Abstract(fields::<_, D::Error>(value)?),
            Some("section") => ContentSection::Section(fields::<_, D::Error>(value)?),
            Some("bibliography") => ContentSection::Bibliography(fields::<_, D::Error>(value)?),
            _ => ContentSection::Unknown { tag },
        })
    }
}

impl<'de> Deserialize<'de> for ContentItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let tag = tag_of(&value);
        Ok(match tag.as_deref() {
            Some("paragraph") => ContentItem::Paragraph {
                text: fields::<TextFields, D::Error>(value)?.text,
            },
            Some("subheader") => ContentItem::Subheader {
                text: fields::<TextFields, D::Error>(value)?.text,
            },
            Some("blockquote") => ContentItem::Blockquote {
                text: fields::<TextFields, D::Error>(value)?.text,
            },
            Some("definition") => {
                let DefinitionFields { term, def } = fields::<_, D::Error>(value)?;
                ContentItem::Definition { term, def }
            }
            Some("list") => ContentItem::List {
                items: fields::<ListFields, D::Error>(value)?.items,
            },
            Some("image") => ContentItem::Image(fields::<_, D::Error>(value)?),
            _ => ContentItem::Unknown { tag },
        })
    }
}

impl ContentSection {
    /// The `type` tag this section was loaded with.
    pub fn tag(&self) -> Option<&str> {
        match self {
            ContentSection::Abstract(_) => Some("abstract"),
            ContentSection::Section(_) => Some("section"),
            ContentSection::Bibliography(_) => Some("bibliography"),
            ContentSection::Unknown { tag } => tag.as_deref(),
        }
    }
}

impl ContentItem {
    /// The `type` tag this item was loaded with.
    pub fn tag(&self) -> Option<&str> {
        match self {
            ContentItem::Paragraph { .. } => Some("paragraph"),
            ContentItem::Subheader { .. } => Some("subheader"),
            ContentItem::Definition { .. } => Some("definition"),
            ContentItem::List { .. } => Some("list"),
            ContentItem::Blockquote { .. } => Some("blockquote"),
            ContentItem::Image(_) => Some("image"),
            ContentItem::Unknown { tag } => tag.as_deref(),
        }
    }
}
