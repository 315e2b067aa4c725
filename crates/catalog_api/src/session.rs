use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::config::CatalogApiConfig;
use crate::error::CatalogApiError;
use crate::frames::{ClientFrame, ServerFrame};
use crate::headers::{build_handshake_headers, GRAPHQL_WS_SUBPROTOCOL};
use crate::queries::{
    change_image_location_request, image_by_pk_request, images_by_location_request,
    ChangeImageLocationData, ImageByPkData, ImageRef, ImagesByLocationData, MutationOutcome,
    OperationRequest,
};
use crate::url::graphql_url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One authenticated graphql-ws channel to the catalog.
///
/// Exactly one operation may be in flight at a time; `execute` takes
/// `&mut self` so overlap is unrepresentable. The session must be released
/// exactly once via [`CatalogSession::close`], which consumes it.
#[derive(Debug)]
pub struct CatalogSession {
    socket: Socket,
    next_operation_id: u64,
}

impl CatalogSession {
    pub(crate) async fn connect(
        config: &CatalogApiConfig,
        token: &str,
    ) -> Result<Self, CatalogApiError> {
        let mut request = graphql_url(&config.hostname)
            .into_client_request()
            .map_err(CatalogApiError::Handshake)?;

        request.headers_mut().insert(
            "sec-websocket-protocol",
            HeaderValue::from_static(GRAPHQL_WS_SUBPROTOCOL),
        );
        for (key, value) in build_handshake_headers(config, token)? {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| CatalogApiError::InvalidHeader(key.clone()))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|_| CatalogApiError::InvalidHeader(key.clone()))?;
            request.headers_mut().insert(name, value);
        }

        let (socket, _response) = connect_async(request)
            .await
            .map_err(CatalogApiError::Handshake)?;
        let mut session = Self {
            socket,
            next_operation_id: 1,
        };

        if let Err(error) = session.send_frame(&ClientFrame::connection_init()).await {
            return Err(match error {
                CatalogApiError::Transport(source) => CatalogApiError::Handshake(source),
                other => other,
            });
        }
        loop {
            match session.read_frame().await {
                Ok(ServerFrame::ConnectionAck) => return Ok(session),
                Ok(ServerFrame::KeepAlive) => continue,
                Ok(ServerFrame::ConnectionError(payload)) => {
                    return Err(CatalogApiError::ConnectionRejected(payload.to_string()));
                }
                Ok(frame) => {
                    return Err(CatalogApiError::ConnectionRejected(format!(
                        "unexpected frame before acknowledgement: {frame:?}"
                    )));
                }
                // The channel is not established until acked, so transport
                // faults here are handshake failures.
                Err(CatalogApiError::Transport(error)) => {
                    return Err(CatalogApiError::Handshake(error));
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Run one operation to completion and return its `data` payload.
    pub async fn execute(&mut self, request: OperationRequest) -> Result<Value, CatalogApiError> {
        let operation_id = self.next_operation_id();
        self.send_frame(&ClientFrame::start(operation_id.clone(), request))
            .await?;

        let mut data: Option<Value> = None;
        loop {
            match self.read_frame().await? {
                ServerFrame::KeepAlive | ServerFrame::ConnectionAck => continue,
                ServerFrame::ConnectionError(payload) => {
                    return Err(CatalogApiError::ConnectionRejected(payload.to_string()));
                }
                ServerFrame::Data { id, payload } if id == operation_id => {
                    data = Some(unwrap_execution_payload(&operation_id, payload)?);
                }
                ServerFrame::Error { id, payload } if id == operation_id => {
                    return Err(CatalogApiError::GraphQl(payload.to_string()));
                }
                ServerFrame::Complete { id } if id == operation_id => {
                    return data.ok_or_else(|| {
                        CatalogApiError::MalformedFrame(format!(
                            "operation {operation_id} completed without a data frame"
                        ))
                    });
                }
                // Frames for other operation ids are stale; skip them.
                ServerFrame::Data { .. } | ServerFrame::Error { .. } | ServerFrame::Complete { .. } => {
                    continue;
                }
            }
        }
    }

    /// Lookup one image by primary key; `None` when the catalog has no
    /// matching entry.
    pub async fn image_by_pk(&mut self, pk: i64) -> Result<Option<ImageRef>, CatalogApiError> {
        let data = self.execute(image_by_pk_request(pk)).await?;
        let payload: ImageByPkData = serde_json::from_value(data)?;
        Ok(payload.image_by_pk)
    }

    /// Lookup images by their currently stored location, in catalog order.
    pub async fn images_by_location(
        &mut self,
        location: &str,
    ) -> Result<Vec<ImageRef>, CatalogApiError> {
        let data = self.execute(images_by_location_request(location)).await?;
        let payload: ImagesByLocationData = serde_json::from_value(data)?;
        Ok(payload.images_by_location)
    }

    /// Request that the image identified by `image_id` move to
    /// `new_location`.
    pub async fn change_image_location(
        &mut self,
        image_id: &str,
        new_location: &str,
    ) -> Result<MutationOutcome, CatalogApiError> {
        let data = self
            .execute(change_image_location_request(image_id, new_location))
            .await?;
        let payload: ChangeImageLocationData = serde_json::from_value(data)?;
        Ok(payload.change_image_location)
    }

    /// Release the channel. The terminate frame is best-effort; the close
    /// handshake itself reports only unexpected transport faults.
    pub async fn close(mut self) -> Result<(), CatalogApiError> {
        let _ = self.send_frame(&ClientFrame::ConnectionTerminate).await;
        match self.socket.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(error) => Err(CatalogApiError::Transport(error)),
        }
    }

    fn next_operation_id(&mut self) -> String {
        let id = self.next_operation_id;
        self.next_operation_id += 1;
        id.to_string()
    }

    async fn send_frame(&mut self, frame: &ClientFrame) -> Result<(), CatalogApiError> {
        let text = serde_json::to_string(frame)?;
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(CatalogApiError::Transport)
    }

    async fn read_frame(&mut self) -> Result<ServerFrame, CatalogApiError> {
        loop {
            let message = self
                .socket
                .next()
                .await
                .ok_or(CatalogApiError::ConnectionClosed)?
                .map_err(CatalogApiError::Transport)?;

            match message {
                Message::Text(text) => {
                    let value: Value = serde_json::from_str(&text)?;
                    if let Some(frame) = ServerFrame::parse(value) {
                        return Ok(frame);
                    }
                }
                Message::Close(_) => return Err(CatalogApiError::ConnectionClosed),
                // Pings are answered by the protocol layer; nothing else on
                // this channel is meaningful to the client.
                _ => continue,
            }
        }
    }
}

/// Pull the `data` object out of an execution result payload, surfacing any
/// `errors` the catalog attached to it.
fn unwrap_execution_payload(
    operation_id: &str,
    payload: Value,
) -> Result<Value, CatalogApiError> {
    if let Some(errors) = payload.get("errors").filter(|errors| !errors.is_null()) {
        let is_empty_list = errors.as_array().is_some_and(Vec::is_empty);
        if !is_empty_list {
            return Err(CatalogApiError::GraphQl(errors.to_string()));
        }
    }

    payload.get("data").cloned().ok_or_else(|| {
        CatalogApiError::MalformedFrame(format!(
            "operation {operation_id} returned a payload without data"
        ))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::unwrap_execution_payload;
    use crate::error::CatalogApiError;

    #[test]
    fn data_payload_is_unwrapped() {
        let payload = json!({"data": {"imageByPk": {"id": "a"}}});
        let data = unwrap_execution_payload("1", payload).expect("data");
        assert_eq!(data, json!({"imageByPk": {"id": "a"}}));
    }

    #[test]
    fn attached_errors_become_graphql_failures() {
        let payload = json!({"data": null, "errors": [{"message": "denied"}]});
        let error = match unwrap_execution_payload("1", payload) {
            Ok(_) => panic!("payload errors should fail"),
            Err(error) => error,
        };
        assert!(matches!(error, CatalogApiError::GraphQl(_)));
    }

    #[test]
    fn payload_without_data_is_malformed() {
        let error = match unwrap_execution_payload("1", json!({})) {
            Ok(_) => panic!("payload without data should fail"),
            Err(error) => error,
        };
        assert!(matches!(error, CatalogApiError::MalformedFrame(_)));
    }
}
