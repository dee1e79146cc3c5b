//! Printify response reshaping
//!
//! The relay forwards upstream JSON almost untouched. These helpers do the
//! little reshaping it does: unwrap list envelopes, pick accepted providers
//! and drop structurally invalid variants.

use serde_json::{Map, Value};

/// Mapper for Printify API responses
pub struct PrintifyMapper;

impl PrintifyMapper {
    /// Extract a list from `{data: [...]}` or a bare array; anything else is empty
    pub fn unwrap_list(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Whether a provider's title (or name) contains `accepted`, ignoring case
    pub fn provider_matches(provider: &Value, accepted: &str) -> bool {
        let accepted = accepted.to_lowercase();
        ["title", "name"].iter().any(|field| {
            provider
                .get(*field)
                .and_then(Value::as_str)
                .map(|s| s.to_lowercase().contains(&accepted))
                .unwrap_or(false)
        })
    }

    /// First provider matching the accepted name
    pub fn select_provider(providers: &[Value], accepted: &str) -> Option<Value> {
        providers
            .iter()
            .find(|p| Self::provider_matches(p, accepted))
            .cloned()
    }

    /// Providers matching any of the accepted names
    pub fn filter_providers(providers: Vec<Value>, accepted: &[String]) -> Vec<Value> {
        providers
            .into_iter()
            .filter(|p| accepted.iter().any(|name| Self::provider_matches(p, name)))
            .collect()
    }

    /// Titles of every provider, for diagnostics
    pub fn provider_titles(providers: &[Value]) -> Vec<String> {
        providers
            .iter()
            .filter_map(|p| p.get("title").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// Locate the variant collection and key it
    ///
    /// Accepts `{variants: ...}`, `{data: {variants: ...}}` or a bare object.
    /// Arrays are keyed by index.
    pub fn extract_variants(value: Value) -> Map<String, Value> {
        let collection = match value {
            Value::Object(mut obj) => {
                let top = obj.remove("variants");
                let nested = obj
                    .get_mut("data")
                    .and_then(Value::as_object_mut)
                    .and_then(|data| data.remove("variants"));

                match (top, nested) {
                    (Some(variants), _) | (None, Some(variants)) => variants,
                    (None, None) => Value::Object(obj),
                }
            }
            other => other,
        };

        match collection {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            _ => Map::new(),
        }
    }

    /// A variant is usable when it has a non-empty title and a non-empty id
    pub fn is_valid_variant(variant: &Value) -> bool {
        let has_title = variant
            .get("title")
            .and_then(Value::as_str)
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);

        let has_id = match variant.get("id") {
            Some(Value::Number(n)) => n.as_f64().map(|id| id != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        };

        has_title && has_id
    }

    /// Keep only usable variants, preserving keys
    pub fn valid_variants(variants: Map<String, Value>) -> Map<String, Value> {
        variants
            .into_iter()
            .filter(|(_, v)| Self::is_valid_variant(v))
            .collect()
    }
}
