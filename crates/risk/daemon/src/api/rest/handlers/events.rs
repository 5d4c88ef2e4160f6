//! Live transition events over SSE

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use risk_engine::WorkflowEvent;
use risk_types::RiskId;
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::{error::RecvError, Receiver};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEventsQuery {
    /// Only forward events for this risk
    pub risk_id: Option<String>,
}

fn to_sse(event: &WorkflowEvent) -> Event {
    Event::default()
        .event(event.action.as_str())
        .id(format!("{}:{}", event.risk_id, event.version))
        .json_data(event)
        .unwrap_or_else(|err| Event::default().comment(format!("encode failed: {}", err)))
}

/// Stream workflow events as they are applied
pub async fn stream_events(
    State(state): State<AppState>,
    query: Result<Query<StreamEventsQuery>, QueryRejection>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let Query(query) = query?;
    let filter = query.risk_id.map(RiskId::new);
    let rx: Receiver<WorkflowEvent> = state.events.subscribe();

    let stream = stream::unfold((rx, filter), |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if filter.as_ref().is_some_and(|id| *id != event.risk_id) {
                        continue;
                    }
                    return Some((Ok(to_sse(&event)), (rx, filter)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    let note = Event::default().comment(format!("lagged {}", skipped));
                    return Some((Ok(note), (rx, filter)));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
