//! Distance-matrix response model.
//!
//! The service answers single-pair queries with the same array-of-arrays
//! shape it uses for full matrices, so only `rows[0].elements[0]` matters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::MatrixError;

/// One element of the matrix (distance, duration, duration_in_traffic, ...).
///
/// Kept opaque: the collector only strips `status` and passes the rest through.
pub type Measurement = serde_json::Map<String, Value>;

const OK: &str = "OK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<Measurement>,
}

impl DistanceMatrixResponse {
    /// A successful single-pair response wrapping `element`.
    pub fn single(element: Measurement) -> Self {
        Self {
            status: OK.to_string(),
            error_message: None,
            origin_addresses: Vec::new(),
            destination_addresses: Vec::new(),
            rows: vec![MatrixRow {
                elements: vec![element],
            }],
        }
    }

    /// Validates the response and returns its first element without `status`.
    ///
    /// Array lengths are checked instead of assumed.
    pub fn into_measurement(self) -> Result<Measurement, MatrixError> {
        if self.status != OK {
            return Err(MatrixError::ResponseStatus {
                status: self.status,
                message: self.error_message,
            });
        }

        let row = self
            .rows
            .into_iter()
            .next()
            .ok_or(MatrixError::Missing("rows"))?;
        let mut element = row
            .elements
            .into_iter()
            .next()
            .ok_or(MatrixError::Missing("elements"))?;

        match element.remove("status") {
            None => Ok(element),
            Some(Value::String(status)) if status == OK => Ok(element),
            Some(Value::String(status)) => Err(MatrixError::ElementStatus(status)),
            Some(other) => Err(MatrixError::Malformed(format!(
                "element status is not a string: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> DistanceMatrixResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn first_element_is_returned_without_status() {
        let response = parse(json!({
            "status": "OK",
            "origin_addresses": ["Culver City, CA"],
            "destination_addresses": ["Santa Monica, CA"],
            "rows": [{
                "elements": [{
                    "distance": { "text": "7.9 mi", "value": 12714 },
                    "duration": { "text": "21 mins", "value": 1260 },
                    "duration_in_traffic": { "text": "34 mins", "value": 2040 },
                    "status": "OK"
                }]
            }]
        }));

        let measurement = response.into_measurement().unwrap();
        assert!(!measurement.contains_key("status"));
        assert_eq!(measurement["duration_in_traffic"]["value"], json!(2040));
        assert_eq!(measurement.len(), 3);
    }

    #[test]
    fn top_level_failure_carries_error_message() {
        let response = parse(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "rows": []
        }));

        let err = response.into_measurement().unwrap_err();
        assert!(matches!(
            err,
            MatrixError::ResponseStatus { ref status, message: Some(_) }
                if status == "REQUEST_DENIED"
        ));
    }

    #[test]
    fn element_failure_is_rejected() {
        let response = parse(json!({
            "status": "OK",
            "rows": [{ "elements": [{ "status": "ZERO_RESULTS" }] }]
        }));

        let err = response.into_measurement().unwrap_err();
        assert!(matches!(err, MatrixError::ElementStatus(ref s) if s == "ZERO_RESULTS"));
    }

    #[test]
    fn empty_arrays_are_reported_not_indexed() {
        let no_rows = parse(json!({ "status": "OK", "rows": [] }));
        assert!(matches!(
            no_rows.into_measurement(),
            Err(MatrixError::Missing("rows"))
        ));

        let no_elements = parse(json!({ "status": "OK", "rows": [{ "elements": [] }] }));
        assert!(matches!(
            no_elements.into_measurement(),
            Err(MatrixError::Missing("elements"))
        ));
    }

    #[test]
    fn only_the_first_element_is_used() {
        let response = parse(json!({
            "status": "OK",
            "rows": [
                { "elements": [{ "duration": { "value": 1 }, "status": "OK" }, { "duration": { "value": 2 } }] },
                { "elements": [{ "duration": { "value": 3 } }] }
            ]
        }));

        let measurement = response.into_measurement().unwrap();
        assert_eq!(measurement["duration"]["value"], json!(1));
    }
}
