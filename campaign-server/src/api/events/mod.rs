//! Change notifications as server-sent events
//!
//! Each event carries a [`SyncPayload`]; its `event` field is the resource
//! name and its `id` the resource version. A subscriber that falls behind
//! receives a single `lagged` event and should re-read everything.

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::{self, Stream};
use shared::message::SyncPayload;
use tokio::sync::broadcast::{Receiver, error::RecvError};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(subscribe))
}

/// GET /api/events
pub async fn subscribe(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(subscribers = state.events.receiver_count() + 1, "Event subscriber connected");
    Sse::new(event_stream(state.subscribe())).keep_alive(KeepAlive::default())
}

fn event_stream(rx: Receiver<SyncPayload>) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(payload) => match to_event(&payload) {
                    Some(event) => return Some((Ok(event), rx)),
                    None => continue,
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged");
                    let event = Event::default().event("lagged").data(skipped.to_string());
                    return Some((Ok(event), rx));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

fn to_event(payload: &SyncPayload) -> Option<Event> {
    Event::default()
        .event(payload.resource.as_str())
        .id(payload.version.to_string())
        .json_data(payload)
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to encode sync event"))
        .ok()
}
