use serde::{Deserialize, Serialize};

/// One typed message from the test-event stream.
///
/// Wire shape: `{"type": "...", "offset": n, "data": ...}` with `type` one of
/// `TEST_START`, `TEST_END`, `ASSERTION`, `BAIL_OUT`. `offset` is the nesting
/// depth the producer emitted the message at; zero means file level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamMessage {
    TestStart {
        offset: usize,
        data: TestPoint,
    },
    TestEnd {
        offset: usize,
        #[serde(default)]
        data: Option<serde_json::Value>,
    },
    Assertion {
        offset: usize,
        data: AssertionResult,
    },
    BailOut {
        offset: usize,
        data: serde_json::Value,
    },
}

/// Payload of a `TEST_START` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPoint {
    pub description: String,
}

/// Payload of an `ASSERTION` message.
///
/// `actual`/`expected` stay as raw JSON until a diagnostic needs them; an
/// absent field is distinct from an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssertionResult {
    #[serde(default)]
    pub pass: bool,
    #[serde(default)]
    pub skip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
}

impl AssertionResult {
    /// Nested test summaries also arrive as `ASSERTION` messages; only
    /// entries carrying an operator are assertion results proper.
    pub fn is_assertion(&self) -> bool {
        self.operator.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::StreamMessage;

    #[test]
    fn messages_deserialize_from_wire_shape() {
        let line = r#"{"type": "ASSERTION", "offset": 1, "data": {"pass": false, "operator": "equal", "actual": 1, "expected": 2, "description": "math", "at": "file.js:3:5"}}"#;
        let message: StreamMessage = serde_json::from_str(line).expect("valid message");

        let StreamMessage::Assertion { offset, data } = message else {
            panic!("expected an assertion");
        };
        assert_eq!(offset, 1);
        assert!(!data.pass);
        assert!(data.is_assertion());
        assert_eq!(data.operator.as_deref(), Some("equal"));
    }

    #[test]
    fn absent_fields_default() {
        let line = r#"{"type": "ASSERTION", "offset": 0, "data": {"pass": true, "description": "nested summary"}}"#;
        let message: StreamMessage = serde_json::from_str(line).expect("valid message");

        let StreamMessage::Assertion { data, .. } = message else {
            panic!("expected an assertion");
        };
        assert!(!data.is_assertion());
        assert!(data.actual.is_none());
        assert!(!data.skip);
    }

    #[test]
    fn bail_out_carries_its_payload() {
        let line = r#"{"type": "BAIL_OUT", "offset": 0, "data": {"message": "boom"}}"#;
        let message: StreamMessage = serde_json::from_str(line).expect("valid message");

        let StreamMessage::BailOut { data, .. } = message else {
            panic!("expected a bail out");
        };
        assert_eq!(data["message"], "boom");
    }
}
