//! Sensor streams and the per-frame references to them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{as_record, decimal, optional_string, Record};
use super::StreamId;
use crate::error::SchemaError;

/// A sensor stream declared in the scene (camera, lidar, radar, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Kind of sensor, e.g. `"camera"` or `"lidar"`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Intrinsics and other sensor properties, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_properties: Option<Value>,
}

impl Stream {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            uri: None,
            description: None,
            stream_properties: None,
        }
    }
}

/// Frame-specific information about a stream: when its data was captured
/// and where it is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamReference {
    /// The stream this reference points to.
    pub stream: StreamId,

    /// Capture time of the stream's data for this frame.
    pub timestamp: Option<Decimal>,

    /// Location of the stream's data for this frame.
    pub uri: Option<String>,
}

impl StreamReference {
    pub fn new(stream: impl Into<StreamId>) -> Self {
        Self {
            stream: stream.into(),
            timestamp: None,
            uri: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: Decimal) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Decodes `{"stream_properties": {"sync": {"timestamp": ..}}, "uri": ..}`
    /// for an already resolved stream.
    pub fn decode(stream: StreamId, value: &Value) -> Result<Self, SchemaError> {
        let uid = Some(stream.as_str());
        let record = as_record(value, "streams", uid)?;

        let timestamp = match record.get("stream_properties") {
            Some(props) => {
                let props = as_record(props, "stream_properties", uid)?;
                match props.get("sync") {
                    Some(sync) => match as_record(sync, "sync", uid)?.get("timestamp") {
                        Some(ts) => Some(decimal(ts, "timestamp", uid)?),
                        None => None,
                    },
                    None => None,
                }
            }
            None => None,
        };

        let uri = optional_string(record, "uri", uid)?;

        Ok(Self {
            stream,
            timestamp,
            uri,
        })
    }

    pub fn encode(&self) -> Value {
        let mut record = Record::new();

        if let Some(timestamp) = &self.timestamp {
            let mut sync = Record::new();
            sync.insert("timestamp".into(), Value::String(timestamp.to_string()));
            let mut props = Record::new();
            props.insert("sync".into(), Value::Object(sync));
            record.insert("stream_properties".into(), Value::Object(props));
        }

        if let Some(uri) = &self.uri {
            record.insert("uri".into(), Value::String(uri.clone()));
        }

        Value::Object(record)
    }
}
