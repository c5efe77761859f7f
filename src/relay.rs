//! WebSocket transport for the room registry.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::rooms::RoomRegistry;
use axum::{
    Router,
    extract::{
        Request, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Routes: `/ws` for players, `/health` for probes.
pub fn router(registry: RoomRegistry) -> Router {
    Router::new()
        .route("/ws", get(upgrade))
        .route("/health", get(|| async { "ok" }))
        .with_state(registry)
        .layer(ServiceBuilder::new().map_request(|req: Request| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
}

/// Binds `host:port` and serves until the process is stopped.
#[instrument(skip(registry))]
pub async fn serve(host: &str, port: u16, registry: RoomRegistry) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Relay ready at ws://{}:{}/ws", host, port);
    axum::serve(listener, router(registry)).await?;
    Ok(())
}

async fn upgrade(ws: WebSocketUpgrade, State(registry): State<RoomRegistry>) -> Response {
    ws.on_upgrade(move |socket| connection(socket, registry))
}

async fn connection(socket: WebSocket, registry: RoomRegistry) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let participant = registry.connect(tx);

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to encode message");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!(participant, "Socket closed while sending");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                debug!(participant, error = %e, "Socket read failed");
                break;
            }
        };
        match frame {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(message) => registry.handle(participant, message),
                Err(e) => {
                    warn!(participant, error = %e, "Unreadable client message");
                    registry.send_to(
                        participant,
                        ServerMessage::RoomError {
                            message: "Malformed message".to_string(),
                        },
                    );
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    registry.disconnect(participant);
    writer.abort();
}
