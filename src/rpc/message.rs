// src/rpc/message.rs
use crate::transport::TransportError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named message envelope dispatched to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcMessage {
    pub method: String,
    pub namespace: Option<String>,
    pub version: Option<String>,
    pub args: Map<String, Value>,
}

impl RpcMessage {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            namespace: None,
            version: None,
            args: Map::new(),
        }
    }

    /// Adds one named argument. `None` values are kept as explicit `null`s.
    pub fn arg<V: Serialize>(mut self, name: &str, value: V) -> Result<Self, TransportError> {
        self.args.insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Adds every field of `args` as a named argument.
    pub fn args<A: Serialize>(mut self, args: &A) -> Result<Self, TransportError> {
        match serde_json::to_value(args)? {
            Value::Object(fields) => {
                self.args.extend(fields);
                Ok(self)
            }
            other => Err(TransportError::Serialization(
                <serde_json::Error as serde::ser::Error>::custom(format!(
                    "message arguments must be an object, got {}",
                    other
                )),
            )),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}
