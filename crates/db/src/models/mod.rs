//! Typed records and DTOs per collection.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` record decoded from a stored document
//!   (the document id and creation timestamp are injected on decode)
//! - A create DTO serialized into the document body on insert
//! - An update DTO (all `Option` fields, absent fields skipped) used as a
//!   shallow merge patch

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use siliconedge_core::types::Timestamp;

use crate::error::StoreError;
use crate::store::{expect_object, Document};

pub mod admin_user;
pub mod application;
pub mod case_study;
pub mod contact;
pub mod session;
pub mod vacancy;

/// A record type stored in one collection.
pub trait Entity: DeserializeOwned + Send {
    /// Collection the records live in.
    const COLLECTION: &'static str;
    /// Human-readable name used in not-found errors.
    const NAME: &'static str;

    /// Fill server-side fields into a new document body before insert.
    fn on_insert(_data: &mut Map<String, Value>, _now: &Timestamp) {}
}

/// Decode a stored document into a typed record.
///
/// The document body is extended with `id` and `created_at` before
/// deserializing, so records can declare both as ordinary fields.
pub fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    let Document {
        id,
        data,
        created_at,
        ..
    } = doc;
    let mut body = expect_object(data)?;
    body.insert("id".into(), Value::String(id));
    body.insert("created_at".into(), serde_json::to_value(created_at)?);
    Ok(serde_json::from_value(Value::Object(body))?)
}

/// Serialize a DTO into a document body.
pub fn encode<D: serde::Serialize>(dto: &D) -> Result<Map<String, Value>, StoreError> {
    expect_object(serde_json::to_value(dto)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        id: String,
        created_at: Timestamp,
        title: String,
    }

    #[test]
    fn decode_injects_id_and_timestamp() {
        let now = Utc::now();
        let doc = Document {
            collection: "probes".into(),
            id: "abc".into(),
            data: json!({ "title": "hello" }),
            created_at: now,
        };
        let probe: Probe = decode(doc).unwrap();
        assert_eq!(probe.id, "abc");
        assert_eq!(probe.created_at, now);
        assert_eq!(probe.title, "hello");
    }

    #[test]
    fn decode_reports_missing_fields() {
        let doc = Document {
            collection: "probes".into(),
            id: "abc".into(),
            data: json!({}),
            created_at: Utc::now(),
        };
        assert!(matches!(decode::<Probe>(doc), Err(StoreError::Serialization(_))));
    }
}
