// src/transport/http.rs
use super::{Transport, TransportError};
use crate::config::TransportConfig;
use crate::rpc::{RpcContext, RpcMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::{ParseError, Url};

/// Suffix of the exchange that broadcasts to every consumer of a topic.
const FANOUT_SUFFIX: &str = "_fanout";

/// Transport that posts envelopes to an HTTP gateway in front of the message bus.
///
/// Each topic is addressed as `<base url>/<topic>`, the topic being a single
/// percent-encoded path segment. Calls wait for the reply document; casts only
/// wait for the gateway to accept the message. The configured timeout bounds
/// the whole exchange, body included.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct Envelope<'a> {
    context: &'a RpcContext,
    message: &'a RpcMessage,
    wait_for_reply: bool,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    failure: Option<Failure>,
}

#[derive(Debug, Deserialize)]
struct Failure {
    exc_type: String,
    #[serde(default)]
    message: String,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
        })
    }

    pub fn topic_url(&self, topic: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidAddress(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(topic);
        Ok(url)
    }

    async fn post(
        &self,
        topic: &str,
        envelope: &Envelope<'_>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.topic_url(topic)?;
        debug!(
            "POST {} method={} wait_for_reply={}",
            url, envelope.message.method, envelope.wait_for_reply
        );

        let response = self
            .client
            .post(url)
            .json(envelope)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_request_error)?;
        Ok(body.to_vec())
    }
}

fn map_request_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Disconnected(e.to_string())
    } else {
        TransportError::Http(e)
    }
}

fn decode_reply(body: &[u8]) -> Result<Value, TransportError> {
    let reply: Reply = serde_json::from_slice(body)?;
    match reply.failure {
        Some(failure) => Err(TransportError::Remote {
            exc_type: failure.exc_type,
            message: failure.message,
        }),
        None => Ok(reply.result),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<Value, TransportError> {
        let envelope = Envelope {
            context,
            message,
            wait_for_reply: true,
        };
        let body = self.post(topic, &envelope).await?;
        decode_reply(&body)
    }

    async fn cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let envelope = Envelope {
            context,
            message,
            wait_for_reply: false,
        };
        self.post(topic, &envelope).await?;
        Ok(())
    }

    async fn fanout_cast(
        &self,
        context: &RpcContext,
        topic: &str,
        message: &RpcMessage,
    ) -> Result<(), TransportError> {
        let envelope = Envelope {
            context,
            message,
            wait_for_reply: false,
        };
        self.post(&format!("{}{}", topic, FANOUT_SUFFIX), &envelope)
            .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
