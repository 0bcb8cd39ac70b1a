//! Field values carried by a contact.
//!
//! # Design
//! A contact is an open-ended bag of CRM fields, so values are modelled as a
//! tagged variant rather than one struct per payload. Maps are `BTreeMap`s,
//! which keeps `serialize_fields` output byte-for-byte deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Case-sensitive field name to value.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single field value as it appears in the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Whether the value counts as blank for required-field checks.
    ///
    /// Blank means `""`, `"0"`, `false`, numeric zero, or an empty
    /// list or map.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Bool(b) => !b,
            FieldValue::Number(n) => n.as_f64() == Some(0.0),
            FieldValue::String(s) => s.is_empty() || s == "0",
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(value: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(value)
    }
}

/// One entry of a contact's `emails` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub address: FieldValue,
    pub kind: String,
    pub do_not_email: bool,
}

impl Email {
    /// The primary address a contact is created with.
    pub fn main(address: FieldValue) -> Self {
        Self {
            address,
            kind: "MAIN".to_string(),
            do_not_email: false,
        }
    }
}

impl From<Email> for FieldValue {
    fn from(email: Email) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert("address".to_string(), email.address);
        entry.insert("type".to_string(), FieldValue::String(email.kind));
        entry.insert("doNotEmail".to_string(), FieldValue::Bool(email.do_not_email));
        FieldValue::Map(entry)
    }
}
