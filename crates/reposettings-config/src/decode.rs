//! Decoding of settings documents
//!
//! The pipeline is all-or-nothing: YAML source → [`Node`] tree →
//! [`normalize`] → strict JSON bytes → typed [`RepoSettings`].

use reposettings_api::Ruleset;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize::{json_kind, normalize};
use crate::path::FieldPath;
use crate::settings::{RepoSettings, RulesetList, SettingsBuilder};
use crate::tree::Node;

pub(crate) const COMMON_KEY: &str = "Common";
pub(crate) const OVERRIDES_KEY: &str = "Overrides";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Common,
    Overrides,
}

impl Section {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "Common" | "common" => Some(Section::Common),
            "Overrides" | "overrides" => Some(Section::Overrides),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Section::Common => COMMON_KEY,
            Section::Overrides => OVERRIDES_KEY,
        }
    }
}

/// Decode a settings document.
///
/// Documents without content (empty, comments only, or an explicit `null`)
/// decode to empty settings.
pub fn decode(input: &[u8]) -> Result<RepoSettings> {
    let Some(tree) = parse_document(input)? else {
        tracing::debug!("Settings document is empty");
        return Ok(RepoSettings::default());
    };

    let canonical = normalize(&tree)?;
    let encoded = serde_json::to_vec(&canonical).map_err(|e| Error::Normalization {
        path: FieldPath::root().to_string(),
        message: format!("canonical tree is not valid JSON: {e}"),
    })?;
    tracing::trace!(bytes = encoded.len(), "Encoded canonical settings tree");

    let document: Value = serde_json::from_slice(&encoded).map_err(|e| Error::Normalization {
        path: FieldPath::root().to_string(),
        message: format!("canonical JSON does not decode: {e}"),
    })?;
    let settings = decode_document(&document)?;

    tracing::debug!(
        common = settings.common().len(),
        overrides = settings.overrides().len(),
        "Decoded repository settings"
    );
    Ok(settings)
}

/// Decode a settings document held in a string
pub fn decode_str(input: &str) -> Result<RepoSettings> {
    decode(input.as_bytes())
}

/// Parse the YAML stream; `None` when it holds no document
fn parse_document(input: &[u8]) -> Result<Option<Node>> {
    let mut documents = serde_yaml::Deserializer::from_slice(input);
    let Some(first) = documents.next() else {
        return Ok(None);
    };
    let node = Node::deserialize(first).map_err(Error::parse)?;
    if documents.next().is_some() {
        return Err(Error::parse(
            "expected a single YAML document, found more than one",
        ));
    }
    Ok(match node {
        Node::Null => None,
        node => Some(node),
    })
}

fn decode_document(document: &Value) -> Result<RepoSettings> {
    let root = FieldPath::root();
    let object = match document {
        Value::Null => return Ok(RepoSettings::default()),
        Value::Object(object) => object,
        other => {
            return Err(Error::schema(
                &root,
                format!("expected a mapping, found {}", json_kind(other)),
            ));
        }
    };

    let mut common = None;
    let mut overrides = None;
    for (key, value) in object {
        let section = Section::from_key(key).ok_or_else(|| {
            Error::schema(
                root.key(key),
                format!("unknown section; expected `{COMMON_KEY}` or `{OVERRIDES_KEY}`"),
            )
        })?;
        let slot = match section {
            Section::Common => &mut common,
            Section::Overrides => &mut overrides,
        };
        if slot.replace(value).is_some() {
            return Err(Error::duplicate_key(&root, section.name()));
        }
    }

    let mut builder = SettingsBuilder::default();
    if let Some(value) = common {
        let path = root.key(COMMON_KEY);
        builder.common(decode_rulesets(value, &path)?, &path)?;
    }
    if let Some(value) = overrides {
        decode_overrides(value, &root.key(OVERRIDES_KEY), &mut builder)?;
    }
    Ok(builder.build())
}

fn decode_overrides(value: &Value, path: &FieldPath, builder: &mut SettingsBuilder) -> Result<()> {
    let entries: &Map<String, Value> = match value {
        Value::Null => return Ok(()),
        Value::Object(entries) => entries,
        other => {
            return Err(Error::schema(
                path,
                format!(
                    "expected a mapping of repository names to ruleset lists, found {}",
                    json_kind(other)
                ),
            ));
        }
    };

    for (repo, list) in entries {
        let rulesets = decode_rulesets(list, &path.key(repo))?;
        builder.add_override(repo, rulesets, path)?;
    }
    Ok(())
}

fn decode_rulesets(value: &Value, path: &FieldPath) -> Result<RulesetList> {
    let items = match value {
        Value::Null => return Ok(RulesetList::default()),
        Value::Array(items) => items,
        other => {
            return Err(Error::schema(
                path,
                format!("expected a sequence of rulesets, found {}", json_kind(other)),
            ));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(Error::schema(
                    path.index(index),
                    format!("expected a ruleset mapping, found {}", json_kind(item)),
                ));
            }
            Ruleset::deserialize(item).map_err(|e| Error::schema(path.index(index), e.to_string()))
        })
        .collect()
}
