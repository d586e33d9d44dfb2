//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const YAML_DELIMITER: &str = "---";
const JSON_DELIMITER: &str = ";;;";

/// Why a metadata block could not be turned into post fields
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened with `{0}` is never closed")]
    Unterminated(&'static str),

    #[error("malformed YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unrecognised date '{0}'")]
    InvalidDate(String),
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a document into its front-matter and the remaining body.
    ///
    /// A document without a metadata block yields empty front-matter and the
    /// whole text as body. A block that is opened but malformed is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if let Some(split) = split_block(content, YAML_DELIMITER) {
            let (block, body) = split?;
            return Ok((Self::from_yaml(block)?, body));
        }

        if let Some(split) = split_block(content, JSON_DELIMITER) {
            let (block, body) = split?;
            return Ok((Self::from_json(block)?, body));
        }

        Ok((FrontMatter::default(), content))
    }

    fn from_yaml(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(block)?)
    }

    fn from_json(block: &str) -> Result<Self, FrontMatterError> {
        let block = block.trim();
        if block.is_empty() {
            return Ok(Self::default());
        }
        // Hexo-style JSON front-matter may omit the outer braces
        if block.starts_with('{') {
            Ok(serde_json::from_str(block)?)
        } else {
            Ok(serde_json::from_str(&format!("{{{}}}", block))?)
        }
    }

    /// The post title; must be present and non-blank
    pub fn require_title(&self) -> Result<&str, FrontMatterError> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(FrontMatterError::MissingField("title"))
    }

    /// The post date; must be present and in a recognised format
    pub fn require_date(&self) -> Result<NaiveDateTime, FrontMatterError> {
        let raw = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(FrontMatterError::MissingField("date"))?;
        parse_date_string(raw).ok_or_else(|| FrontMatterError::InvalidDate(raw.to_string()))
    }
}

/// Find a block fenced by `delimiter` lines at the very start of `content`.
///
/// Returns `None` when the first line is not the delimiter.
fn split_block<'a>(
    content: &'a str,
    delimiter: &'static str,
) -> Option<Result<(&'a str, &'a str), FrontMatterError>> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != delimiter {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == delimiter {
            let block = &content[first.len()..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some(Ok((block, body)));
        }
        offset += line.len();
    }

    Some(Err(FrontMatterError::Unterminated(delimiter)))
}

/// Parse a date string in various formats.
///
/// Offsets are normalised to UTC so the result never depends on the local
/// timezone of the build machine.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.naive_utc());
    }

    None
}
