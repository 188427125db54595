//! Title block metadata.

use super::scalar::{lenient_opt_text, lenient_text};
use super::Scalar;
use serde::{Deserialize, Serialize};

/// One author or field of study, as shown in the title block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Display text
    #[serde(rename = "name")]
    pub label: String,

    /// External link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Came from a bare string rather than a record; rendered verbatim
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub plain: bool,
}

impl Credit {
    /// Create a linked credit.
    pub fn linked(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: Some(url.into()),
            plain: false,
        }
    }

    /// Create a credit from a bare display string.
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
            plain: true,
        }
    }
}

/// Normalized title block.
///
/// Authors and fields arrive either as a list of `{name, url}` records or
/// as a single string; both become a list of [`Credit`]s at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMeta")]
pub struct Meta {
    pub title: String,
    pub date: String,
    pub authors: Vec<Credit>,
    pub fields: Vec<Credit>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawMeta {
    #[serde(deserialize_with = "lenient_text")]
    title: String,
    #[serde(deserialize_with = "lenient_text")]
    date: String,
    authors: Option<CreditSpec>,
    author: Option<CreditSpec>,
    fields: Option<CreditSpec>,
    field: Option<CreditSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreditSpec {
    Plain(Scalar),
    Records(Vec<CreditRecord>),
}

#[derive(Deserialize)]
struct CreditRecord {
    #[serde(default, alias = "field")]
    name: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    url: Option<String>,
    #[serde(default)]
    plain: bool,
}

impl CreditSpec {
    fn into_credits(self) -> Vec<Credit> {
        match self {
            CreditSpec::Plain(s) => vec![Credit::plain(s.to_string())],
            CreditSpec::Records(records) => records
                .into_iter()
                .map(|r| Credit {
                    label: r.name.map(|n| n.to_string()).unwrap_or_default(),
                    url: r.url.filter(|u| !u.is_empty()),
                    plain: r.plain,
                })
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            CreditSpec::Plain(s) => s.to_string().is_empty(),
            CreditSpec::Records(records) => records.is_empty(),
        }
    }
}

/// The list-bearing key wins; the singular key is the fallback.
fn pick(list: Option<CreditSpec>, single: Option<CreditSpec>) -> Vec<Credit> {
    list.filter(|spec| !spec.is_empty())
        .or(single)
        .map(CreditSpec::into_credits)
        .unwrap_or_default()
}

impl From<RawMeta> for Meta {
    fn from(raw: RawMeta) -> Self {
        Self {
            title: raw.title,
            date: raw.date,
            authors: pick(raw.authors, raw.author),
            fields: pick(raw.fields, raw.field),
        }
    }
}
