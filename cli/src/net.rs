//! Bridges between the store client and the event loop.
//!
//! Every network call runs on its own spawned task and reports back as a
//! [`NetEvent`]; the view state is only ever touched on the loop task. There
//! is no cancellation: a request that was issued runs to completion or
//! failure, and a dead receiver just drops the result.

use std::sync::Arc;

use bookstall_core::{Book, StoreClient, User};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone)]
pub enum NetEvent {
    CatalogLoaded(Vec<Book>),
    CatalogFailed(String),
    SessionProbed(Option<User>),
    LoginSucceeded(User),
    LoginFailed(String),
    CheckoutComplete,
}

pub fn spawn_fetch_catalog(client: Arc<StoreClient>, tx: UnboundedSender<NetEvent>) {
    tokio::spawn(async move {
        let event = match client.fetch_books().await {
            Ok(books) => NetEvent::CatalogLoaded(books),
            Err(e) => {
                tracing::warn!(target: "bookstall.net", "catalog fetch failed: {e}");
                NetEvent::CatalogFailed(format!("Failed to fetch books: {e}"))
            }
        };
        let _ = tx.send(event);
    });
}

pub fn spawn_probe_session(client: Arc<StoreClient>, tx: UnboundedSender<NetEvent>) {
    tokio::spawn(async move {
        let event = match client.probe_session().await {
            Ok(user) => NetEvent::SessionProbed(Some(user)),
            Err(e) => {
                // Not surfaced: an expired or absent cookie is the normal case.
                tracing::debug!(target: "bookstall.net", "session probe failed: {e}");
                NetEvent::SessionProbed(None)
            }
        };
        let _ = tx.send(event);
    });
}

pub fn spawn_login(
    client: Arc<StoreClient>,
    tx: UnboundedSender<NetEvent>,
    username: String,
    password: String,
) {
    tokio::spawn(async move {
        let event = match client.login(&username, &password).await {
            Ok(user) => NetEvent::LoginSucceeded(user),
            Err(e) => {
                tracing::debug!(target: "bookstall.net", "login failed: {e}");
                NetEvent::LoginFailed(e.login_message())
            }
        };
        let _ = tx.send(event);
    });
}

/// Simulated order placement: a fixed delay, then success. There is no order
/// endpoint on the server side, so none is called.
pub fn spawn_checkout(tx: UnboundedSender<NetEvent>, delay_ms: u64) {
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        let _ = tx.send(NetEvent::CheckoutComplete);
    });
}
