//! A single contact submitted to NGP VAN's find-or-create endpoint.
//!
//! # Design
//! `ContactRecord` owns the field set, the required-field policy and the
//! outcome of the last validation and submission. The request itself is
//! produced as plain data by `build_find_or_create`; `save` runs it through
//! an injected `HttpClient`, so everything except the network round-trip is
//! deterministic.
//!
//! Validation is recomputed from scratch on every call and replaces the
//! stored messages. Transport faults are both returned from `save` and kept
//! for later inspection through `fault`.

use std::fmt;

use crate::error::ContactError;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
use crate::types::{Email, FieldValue, Fields};

/// Base URL of the NGP VAN contacts API.
pub const DEFAULT_BASE_URL: &str = "https://api.myngp.com/v2/contacts/";

/// Path of the find-or-create endpoint, relative to the base URL.
pub const FIND_OR_CREATE_PATH: &str = "findOrCreate";

/// Contact type sent with every record.
pub const CONTACT_TYPE: &str = "INDIVIDUAL";

const IDENTITY_KEYS: [&str; 3] = ["firstName", "lastName", "email"];
const SEEDED_FIELDS: [&str; 4] = ["type", "lastName", "firstName", "emails"];

/// One outbound contact and the result of submitting it.
#[derive(Clone)]
pub struct ContactRecord {
    api_key: String,
    base_url: String,
    fields: Fields,
    required_fields: Vec<String>,
    errors: Vec<String>,
    last_result: Option<HttpResponse>,
    last_fault: Option<TransportError>,
}

impl ContactRecord {
    /// Seeds a contact from `data`, which must contain `firstName`,
    /// `lastName` and `email`. Only presence is checked here; blank values
    /// are caught by `validate`. Other keys in `data` are ignored.
    pub fn new(api_key: impl Into<String>, data: &Fields) -> Result<Self, ContactError> {
        let missing: Vec<&'static str> = IDENTITY_KEYS
            .into_iter()
            .filter(|key| !data.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::InvalidInput { missing });
        }

        let mut fields = Fields::new();
        fields.insert("type".to_string(), FieldValue::from(CONTACT_TYPE));
        fields.insert("lastName".to_string(), data["lastName"].clone());
        fields.insert("firstName".to_string(), data["firstName"].clone());
        fields.insert(
            "emails".to_string(),
            FieldValue::List(vec![Email::main(data["email"].clone()).into()]),
        );

        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.trim_end_matches('/').to_string(),
            fields,
            required_fields: vec!["emails".to_string()],
            errors: Vec::new(),
            last_result: None,
            last_fault: None,
        })
    }

    /// Points the record at a different API host, e.g. a staging server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the required-field list. Names are not checked until
    /// validation.
    pub fn set_required_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = names.into_iter().map(Into::into).collect();
        self.errors.clear();
    }

    /// Appends to the required-field list. Duplicates are kept.
    pub fn add_required_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields.extend(names.into_iter().map(Into::into));
        self.errors.clear();
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Adds or replaces an extra field sent alongside the identity fields.
    ///
    /// The fields seeded at construction (`type`, `firstName`, `lastName`,
    /// `emails`) cannot be replaced.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), ContactError> {
        let name = name.into();
        if SEEDED_FIELDS.contains(&name.as_str()) {
            return Err(ContactError::ReservedField(name));
        }
        self.fields.insert(name, value.into());
        self.errors.clear();
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// JSON encoding of the field set, as sent in the request body.
    pub fn serialize_fields(&self) -> Result<String, ContactError> {
        serde_json::to_string(&self.fields).map_err(|e| ContactError::Serialization(e.to_string()))
    }

    /// Messages for every required field that is absent or blank, in
    /// required-field order. Does not touch stored state.
    pub fn missing_required(&self) -> Vec<String> {
        self.required_fields
            .iter()
            .filter(|name| self.fields.get(name.as_str()).map_or(true, FieldValue::is_blank))
            .map(|name| format!("{name} is required"))
            .collect()
    }

    /// Re-checks required fields and stores the resulting messages,
    /// replacing any from an earlier run.
    pub fn validate(&mut self) -> bool {
        self.errors = self.missing_required();
        self.errors.is_empty()
    }

    /// Alias of `validate`.
    pub fn is_valid(&mut self) -> bool {
        self.validate()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The find-or-create request for the current field set.
    pub fn build_find_or_create(&self) -> Result<HttpRequest, ContactError> {
        let body = self.serialize_fields()?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/{FIND_OR_CREATE_PATH}", self.base_url),
            headers: vec![
                ("apiKey".to_string(), self.api_key.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    /// Validates and, if valid, submits the contact through `client`.
    ///
    /// Returns `Ok(false)` without sending anything when validation fails;
    /// the messages are available from `errors`. Returns `Ok(true)` once any
    /// HTTP response arrives, whatever its status, and stores it for
    /// `result`/`last_response`.
    ///
    /// # Errors
    ///
    /// `ContactError::Transport` when the exchange fails. The same fault is
    /// kept in `fault` and the previous result is left as it was.
    pub fn save<C>(&mut self, client: &C) -> Result<bool, ContactError>
    where
        C: HttpClient + ?Sized,
    {
        if !self.validate() {
            tracing::warn!(errors = ?self.errors, "contact failed validation; not submitted");
            return Ok(false);
        }

        let request = self.build_find_or_create()?;
        self.last_fault = None;
        tracing::debug!(url = %request.path, "submitting contact");

        match client.execute(request) {
            Ok(response) => {
                tracing::info!(status = response.status, "contact submitted");
                self.last_result = Some(response);
                Ok(true)
            }
            Err(fault) => {
                tracing::warn!(error = %fault, "contact submission failed");
                self.last_fault = Some(fault.clone());
                Err(ContactError::Transport(fault))
            }
        }
    }

    /// Body of the last response, or `None` before a completed save.
    pub fn result(&self) -> Option<&str> {
        self.last_result.as_ref().map(|r| r.body.as_str())
    }

    pub fn last_response(&self) -> Option<&HttpResponse> {
        self.last_result.as_ref()
    }

    pub fn fault(&self) -> Option<&TransportError> {
        self.last_fault.as_ref()
    }

    pub fn has_fault(&self) -> bool {
        self.last_fault.is_some()
    }
}

impl fmt::Debug for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactRecord")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("fields", &self.fields)
            .field("required_fields", &self.required_fields)
            .field("errors", &self.errors)
            .field("last_result", &self.last_result)
            .field("last_fault", &self.last_fault)
            .finish()
    }
}
