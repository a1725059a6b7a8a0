//! Command file encodings and wire shapes
//!
//! Every command file carries the same envelope regardless of encoding:
//!
//! ```json
//! {
//!   "action": "create",
//!   "object": "Teacher",
//!   "data": { "subject": "Math", "salary": 500, "classroom": ["101"],
//!             "person": { "name": "A", "surname": "B", "personalCode": "X1" } }
//! }
//! ```
//!
//! XML files use the same element names under an arbitrary root element.
//! Person fields sit directly inside `<data>` and a teacher's classrooms are
//! listed as `<classroom><value>101</value></classroom>` (see [`crate::xml`]):
//!
//! ```xml
//! <command>
//!   <action>create</action>
//!   <object>Student</object>
//!   <data><class>5A</class><name>A</name><surname>B</surname><personalCode>X1</personalCode></data>
//! </command>
//! ```
//!
//! The envelope header is decoded first; the payload under `data` is decoded
//! again from the same bytes once the operation shape is known.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Result};

/// Encoding of a raw command buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Json,
    Toml,
    Xml,
}

impl Encoding {
    /// Pick the encoding from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Encoding::Json),
            "toml" => Some(Encoding::Toml),
            "xml" => Some(Encoding::Xml),
            _ => None,
        }
    }

    /// Decode a buffer into any deserializable shape
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            Encoding::Json => serde_json::from_slice(bytes).map_err(|e| self.error(e)),
            Encoding::Toml => {
                let text = std::str::from_utf8(bytes).map_err(|e| self.error(e))?;
                toml::from_str(text).map_err(|e| self.error(e))
            }
            Encoding::Xml => {
                let text = std::str::from_utf8(bytes).map_err(|e| self.error(e))?;
                quick_xml::de::from_str(text).map_err(|e| self.error(e))
            }
        }
    }

    fn error(&self, err: impl fmt::Display) -> RecordError {
        RecordError::Decode {
            encoding: *self,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => write!(f, "json"),
            Encoding::Toml => write!(f, "toml"),
            Encoding::Xml => write!(f, "xml"),
        }
    }
}

/// Header shared by every command: which action on which object kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEnvelope {
    pub action: String,
    pub object: String,
}

/// Body of a command, nested under `data`
#[derive(Debug, Clone, Deserialize)]
pub struct Payload<T> {
    pub data: T,
}

/// Payload used by read and delete
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdPayload {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_encoding_from_extension() {
        assert_eq!(Encoding::from_path(&PathBuf::from("a/01.json")), Some(Encoding::Json));
        assert_eq!(Encoding::from_path(&PathBuf::from("02.toml")), Some(Encoding::Toml));
        assert_eq!(Encoding::from_path(&PathBuf::from("03.xml")), Some(Encoding::Xml));
        assert_eq!(Encoding::from_path(&PathBuf::from("04.csv")), None);
        assert_eq!(Encoding::from_path(&PathBuf::from("README")), None);
    }

    #[test]
    fn test_envelope_ignores_payload() {
        let raw = br#"{"action": "read", "object": "Student", "data": {"id": "4"}}"#;
        let envelope: CommandEnvelope = Encoding::Json.decode(raw).unwrap();
        assert_eq!(envelope.action, "read");
        assert_eq!(envelope.object, "Student");

        let payload: Payload<IdPayload> = Encoding::Json.decode(raw).unwrap();
        assert_eq!(payload.data.id, "4");
    }

    #[test]
    fn test_toml_envelope() {
        let raw = b"action = \"delete\"\nobject = \"Staff\"\n\n[data]\nid = \"7\"\n";
        let envelope: CommandEnvelope = Encoding::Toml.decode(raw).unwrap();
        assert_eq!(envelope.action, "delete");

        let payload: Payload<IdPayload> = Encoding::Toml.decode(raw).unwrap();
        assert_eq!(payload.data.id, "7");
    }

    #[test]
    fn test_xml_envelope() {
        let raw = b"<command>\n  <action>read</action>\n  <object>Teacher</object>\n  <data><id>12</id></data>\n</command>";
        let envelope: CommandEnvelope = Encoding::Xml.decode(raw).unwrap();
        assert_eq!(envelope.action, "read");
        assert_eq!(envelope.object, "Teacher");

        let payload: Payload<IdPayload> = Encoding::Xml.decode(raw).unwrap();
        assert_eq!(payload.data.id, "12");
    }

    #[test]
    fn test_malformed_xml_is_decode_error() {
        let err = Encoding::Xml.decode::<CommandEnvelope>(b"<command><action>read</command>").unwrap_err();
        assert!(matches!(err, RecordError::Decode { encoding: Encoding::Xml, .. }));
    }

    #[test]
    fn test_malformed_buffer_is_decode_error() {
        let err = Encoding::Json.decode::<CommandEnvelope>(b"{\"action\": ").unwrap_err();
        assert!(matches!(err, RecordError::Decode { encoding: Encoding::Json, .. }));
    }
}
