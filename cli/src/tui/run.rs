use std::sync::Arc;
use std::time::Duration;

use bookstall_core::StoreClient;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::events::InputReader;
use super::terminal::{restore_terminal, setup_terminal};
use super::ui;
use crate::app::{Action, StoreApp};
use crate::error::CliError;
use crate::net::{self, NetEvent};

pub async fn run(mut app: StoreApp, client: Arc<StoreClient>) -> Result<(), CliError> {
    let mut terminal = setup_terminal().map_err(CliError::Terminal)?;
    let result = run_on_terminal(&mut terminal, &mut app, client).await;
    restore_terminal(&mut terminal);
    result
}

async fn run_on_terminal(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut StoreApp,
    client: Arc<StoreClient>,
) -> Result<(), CliError> {
    tracing::debug!(target: "bookstall.tui", "event loop starting");
    let (net_tx, mut net_rx) = mpsc::unbounded_channel::<NetEvent>();

    // Startup: catalog fetch plus the silent session probe.
    net::spawn_fetch_catalog(Arc::clone(&client), net_tx.clone());
    net::spawn_probe_session(Arc::clone(&client), net_tx.clone());

    let (input_reader, mut input_rx) = InputReader::start();
    let mut tick =
        tokio::time::interval(Duration::from_millis(app.config.update_interval_ms.max(16)));

    let mut exit_requested = false;

    // Initial render so the loading screen shows immediately
    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| CliError::Terminal(e.to_string()))?;

    loop {
        tokio::select! {
            Some(event) = net_rx.recv() => {
                app.handle_net(event);
            }
            Some(key) = input_rx.recv() => {
                match app.handle_key(key) {
                    Action::Quit => exit_requested = true,
                    Action::FetchCatalog => {
                        net::spawn_fetch_catalog(Arc::clone(&client), net_tx.clone());
                    }
                    Action::SubmitLogin { username, password } => {
                        net::spawn_login(Arc::clone(&client), net_tx.clone(), username, password);
                    }
                    Action::StartCheckout => {
                        net::spawn_checkout(net_tx.clone(), app.config.checkout_delay_ms);
                    }
                    Action::None => {}
                }
            }
            _ = tick.tick() => {}
        }

        app.expire_status();
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| CliError::Terminal(e.to_string()))?;

        if exit_requested {
            break;
        }
    }

    input_reader.stop();
    Ok(())
}
