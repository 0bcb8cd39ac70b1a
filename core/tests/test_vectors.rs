//! Verify request building, validation and result handling against the JSON
//! vectors in `test-vectors/`.
//!
//! Each vector gives construction data, optional extra fields and
//! required-field changes, then either the expected request plus a simulated
//! response, or the expected validation errors. Bodies are compared as parsed
//! JSON so field order does not matter.

use std::cell::Cell;

use ngp_contact::{
    ContactRecord, FieldValue, Fields, HttpClient, HttpMethod, HttpRequest, HttpResponse,
    TransportError, DEFAULT_BASE_URL,
};

/// Answers every request with one canned response and checks it against
/// the vector's expected request.
struct VectorClient<'a> {
    name: &'a str,
    expected: &'a serde_json::Value,
    response: HttpResponse,
    calls: Cell<usize>,
}

impl HttpClient for VectorClient<'_> {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        let name = self.name;
        let expected = self.expected;

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.path,
            format!("{}{}", DEFAULT_BASE_URL.trim_end_matches('/'), expected["path"].as_str().unwrap()),
            "{name}: path"
        );

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, expected["body"], "{name}: body");

        Ok(self.response.clone())
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn find_or_create_test_vectors() {
    let raw = include_str!("../../test-vectors/find_or_create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Fields = serde_json::from_value(case["input"].clone()).unwrap();

        let mut contact = ContactRecord::new(case["api_key"].as_str().unwrap(), &input).unwrap();
        if let Some(extra) = case.get("extra_fields") {
            let extra: Fields = serde_json::from_value(extra.clone()).unwrap();
            for (key, value) in extra {
                contact.set_field(key, value).unwrap();
            }
        }
        if let Some(names) = case.get("set_required_fields") {
            contact.set_required_fields(string_list(names));
        }
        if let Some(names) = case.get("add_required_fields") {
            contact.add_required_fields(string_list(names));
        }

        let response = case.get("simulated_response").map(|sim| HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        });
        let client = VectorClient {
            name,
            expected: &case["expected_request"],
            response: response.clone().unwrap_or(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: String::new(),
            }),
            calls: Cell::new(0),
        };

        let saved = contact.save(&client).unwrap();

        if let Some(expected_errors) = case.get("expected_errors") {
            assert!(!saved, "{name}: expected validation failure");
            assert_eq!(client.calls.get(), 0, "{name}: request must not be sent");
            assert_eq!(contact.errors(), string_list(expected_errors), "{name}: errors");
            assert!(contact.result().is_none(), "{name}: no result");
        } else {
            assert!(saved, "{name}: expected save");
            assert_eq!(client.calls.get(), 1, "{name}: one request");
            assert!(!contact.has_errors(), "{name}: no errors");
            assert_eq!(
                contact.result(),
                case["expected_result"].as_str(),
                "{name}: result"
            );
            assert_eq!(contact.last_response(), response.as_ref(), "{name}: response");
        }

        let round_trip: Fields = serde_json::from_str(&contact.serialize_fields().unwrap()).unwrap();
        assert_eq!(&round_trip, contact.fields(), "{name}: serialized fields");
        assert!(matches!(contact.field("type"), Some(FieldValue::String(t)) if t == "INDIVIDUAL"));
    }
}
