//! Event loop driving the UI.
//!
//! Runs on a single-threaded runtime: key events, completed requests and a
//! periodic tick are multiplexed with `select!`. Requests are spawned as
//! local tasks and report back over a channel, tagged with the navigation
//! epoch they were issued in.

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::{App, Request, Response};
use crate::error::AppError;
use crate::terminal::TerminalSession;
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(250);

type ResponseSender = mpsc::UnboundedSender<(u64, Response)>;

/// Runs `request` against the API.
pub async fn perform(api: &ApiClient, request: Request) -> Response {
    match request {
        Request::LoadTestQuestions => Response::TestQuestions(api.list_test_questions().await),
        Request::SubmitTest(answers) => Response::Submitted(api.submit_test(&answers).await),
        Request::LoadAdminQuestions => {
            Response::AdminQuestions(api.list_questions_with_answers().await)
        }
        Request::CreateQuestion(draft) => Response::Saved(api.create_question(&draft).await),
        Request::UpdateQuestion { id, update } => {
            Response::Saved(api.update_question(id, &update).await)
        }
        Request::DeleteQuestion(id) => Response::Deleted {
            id,
            result: api.delete_question(id).await,
        },
    }
}

fn dispatch(api: &ApiClient, tx: &ResponseSender, epoch: u64, request: Request) {
    tracing::debug!(epoch, ?request, "dispatching request");
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let response = perform(&api, request).await;
        if tx.send((epoch, response)).is_err() {
            tracing::debug!("event loop gone, dropping response");
        }
    });
}

/// Takes over the terminal until the user quits.
pub async fn run(app: &mut App, api: ApiClient, initial: Option<Request>) -> Result<(), AppError> {
    let mut terminal = TerminalSession::enter()?;
    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, Response)>();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    if let Some(request) = initial {
        dispatch(&api, &tx, app.epoch(), request);
    }

    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(request) = app.handle_key(key) {
                        dispatch(&api, &tx, app.epoch(), request);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some((epoch, response)) = rx.recv() => app.handle_response(epoch, response),
            _ = ticker.tick() => app.tick(Instant::now()),
        }
    }

    tracing::info!("quitting");
    Ok(())
}
