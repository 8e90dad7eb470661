//! Categorical encoding tables.
//!
//! A table maps a normalized category string to the integer code the trained
//! model was fit on. Ordinal tables carry a fixed, domain-defined order;
//! nominal tables are assigned at fit time and shipped alongside the model
//! artifacts, so the exact same codes are used at serving time.
//!
//! Unknown categories follow an explicit per-table policy: `FallbackZero`
//! degrades silently to code 0, `Reject` surfaces a typed error. The policy
//! is part of the persisted snapshot, never a per-call-site decision.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised by tables with the `Reject` policy when a category was never seen
/// during fitting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category '{value}' for field '{field}'")]
pub struct UnknownCategory {
    pub field: String,
    pub value: String,
}

/// What to do when a looked-up category is not in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Encode as 0. Matches the dictionary-with-default behavior the models
    /// were trained against.
    #[default]
    FallbackZero,
    /// Refuse the request with an `UnknownCategory` error.
    Reject,
}

/// Normalization convention applied to both stored keys and looked-up
/// inputs, which makes every lookup case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// "ml engineer" -> "Ml Engineer", "no degree" -> "No Degree".
    TitleCase,
    /// First character uppercased, the rest lowercased: "b2" -> "B2".
    Capitalize,
    /// Plain case-fold.
    Lowercase,
}

impl Normalization {
    pub fn apply(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            Normalization::TitleCase => title_case(trimmed),
            Normalization::Capitalize => capitalize(trimmed),
            Normalization::Lowercase => trimmed.to_lowercase(),
        }
    }
}

/// Category-string -> integer-code mapping with a fixed normalization
/// convention and unknown-category policy.
///
/// Persisted snapshots store keys already normalized; the constructors below
/// normalize at build time so in-process tables behave identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingTable {
    field: String,
    normalization: Normalization,
    #[serde(default)]
    unknown_policy: UnknownPolicy,
    codes: HashMap<String, u32>,
}

impl EncodingTable {
    /// Ordinal table: code is the label's position in the domain order.
    pub fn ordinal(field: &str, normalization: Normalization, labels: &[&str]) -> Self {
        let codes = labels
            .iter()
            .enumerate()
            .map(|(code, label)| (normalization.apply(label), code as u32))
            .collect();
        EncodingTable {
            field: field.to_string(),
            normalization,
            unknown_policy: UnknownPolicy::default(),
            codes,
        }
    }

    /// Table with explicit codes (nominal tables, or ordinal tables whose
    /// codes are not positional, like the job-fit degree map).
    pub fn with_codes(
        field: &str,
        normalization: Normalization,
        unknown_policy: UnknownPolicy,
        pairs: &[(&str, u32)],
    ) -> Self {
        let codes = pairs
            .iter()
            .map(|(label, code)| (normalization.apply(label), *code))
            .collect();
        EncodingTable {
            field: field.to_string(),
            normalization,
            unknown_policy,
            codes,
        }
    }

    /// Normalizes and looks up a raw category. Misses resolve per the
    /// table's policy: code 0 or a typed rejection.
    pub fn encode(&self, raw: &str) -> Result<u32, UnknownCategory> {
        let key = self.normalization.apply(raw);
        match self.codes.get(&key) {
            Some(code) => Ok(*code),
            None => match self.unknown_policy {
                UnknownPolicy::FallbackZero => Ok(0),
                UnknownPolicy::Reject => Err(UnknownCategory {
                    field: self.field.clone(),
                    value: raw.trim().to_string(),
                }),
            },
        }
    }
}

/// Python-style title casing: uppercase at the start of each alphabetic run,
/// lowercase inside it. Non-alphabetic characters pass through and reset the
/// run, so "6+" and "0-1" are unchanged.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}
