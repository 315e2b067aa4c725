use serde::Serialize;
use serde_json::Value;

use crate::queries::OperationRequest;

/// Frame sent by this client over the graphql-ws channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    ConnectionInit { payload: Value },
    Start { id: String, payload: OperationRequest },
    Stop { id: String },
    ConnectionTerminate,
}

impl ClientFrame {
    pub fn connection_init() -> Self {
        Self::ConnectionInit {
            payload: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn start(id: impl Into<String>, payload: OperationRequest) -> Self {
        Self::Start {
            id: id.into(),
            payload,
        }
    }
}

/// Frame received from the catalog over the graphql-ws channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    ConnectionAck,
    ConnectionError(Value),
    KeepAlive,
    Data { id: String, payload: Value },
    Error { id: String, payload: Value },
    Complete { id: String },
}

impl ServerFrame {
    /// Map a decoded channel message to a frame. Unknown frame types yield
    /// `None` and are skipped by the session read loop.
    pub fn parse(value: Value) -> Option<Self> {
        let frame_type = value.get("type")?.as_str()?;

        match frame_type {
            "connection_ack" => Some(Self::ConnectionAck),
            "connection_error" => {
                let payload = value.get("payload").cloned().unwrap_or(Value::Null);
                Some(Self::ConnectionError(payload))
            }
            "ka" => Some(Self::KeepAlive),
            "data" => Some(Self::Data {
                id: frame_id(&value)?,
                payload: value.get("payload").cloned().unwrap_or(Value::Null),
            }),
            "error" => Some(Self::Error {
                id: frame_id(&value)?,
                payload: value.get("payload").cloned().unwrap_or(Value::Null),
            }),
            "complete" => Some(Self::Complete {
                id: frame_id(&value)?,
            }),
            _ => None,
        }
    }
}

fn frame_id(value: &Value) -> Option<String> {
    value
        .get("id")
        .and_then(|id| id.as_str())
        .map(ToString::to_string)
}
