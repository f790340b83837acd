//! CLI entry point for muxctl.

mod cli;

use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use muxctl::config::{load_config, Config};
use muxctl::events::{EventKind, StreamEventClient};
use muxctl::exec::ConnectionManager;
use muxctl::render::Renderer;
use muxctl::tmux::{BatchReport, MultiplexerController, SplitDirection};

use cli::{Command, MouseAction};

/// Primary log filter variable; `RUST_LOG` is read when it is unset.
const LOG_ENV: &str = "MUXCTL_LOG";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let renderer = Renderer::new(!args.no_color && std::io::stdout().is_terminal());

    let mut config = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded.config,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(url) = &args.server_url {
        config.server.url = url.clone();
        if let Err(e) = config.validate() {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    }

    if let Err(msg) = run(args, &config, renderer).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args, config: &Config, renderer: Renderer) -> Result<(), String> {
    let conn = args.connection.as_str();
    let controller = MultiplexerController::new(Arc::new(ConnectionManager::local()))
        .with_config_file(config.tmux.config_file.clone());

    let command = match args.command {
        Command::Attach { session } => {
            renderer.raw(&controller.attach_command(&session));
            return Ok(());
        }
        Command::Watch { kinds } => return watch(config, renderer, kinds).await,
        command => command,
    };

    if !controller.is_available(conn).await {
        return Err(format!("tmux is not available on connection `{conn}`"));
    }

    match command {
        Command::Tree { json } => {
            let tree = controller.session_tree(conn).await;
            if json {
                let text = serde_json::to_string_pretty(&tree)
                    .map_err(|e| format!("failed to encode tree: {e}"))?;
                renderer.raw(&text);
            } else {
                renderer.tree(&tree);
            }
        }
        Command::Sessions => renderer.sessions(&controller.list_sessions(conn).await),
        Command::Windows { session } => {
            renderer.windows(&controller.list_windows(conn, &session).await)
        }
        Command::Panes { session, window } => {
            renderer.panes(&controller.list_panes(conn, &session, &window).await)
        }
        Command::NewSession { name } => {
            match controller
                .create_session(conn, name.as_deref())
                .await
                .map_err(|e| e.message().to_string())?
            {
                Some(session) => renderer.done(&format!("created session {}", session.name)),
                None => renderer.warn("session created but not found in listing"),
            }
        }
        Command::KillSession { names } => {
            let report = controller.kill_sessions(conn, &names).await;
            finish_batch(renderer, &report, "session", "killed")?;
        }
        Command::RenameSession { old, new } => {
            controller
                .rename_session(conn, &old, &new)
                .await
                .map_err(|e| e.message().to_string())?;
            renderer.done(&format!("renamed session {old} to {new}"));
        }
        Command::NewWindow { session, name } => {
            controller
                .create_window(conn, &session, name.as_deref())
                .await
                .map_err(|e| e.message().to_string())?;
            renderer.done(&format!("created window in {session}"));
        }
        Command::KillWindow { session, indexes } => {
            let targets: Vec<(String, u32)> = indexes
                .into_iter()
                .map(|index| (session.clone(), index))
                .collect();
            let report = controller.kill_windows(conn, &targets).await;
            finish_batch(renderer, &report, "window", "deleted")?;
        }
        Command::RenameWindow {
            session,
            index,
            name,
        } => {
            controller
                .rename_window(conn, &session, index, &name)
                .await
                .map_err(|e| e.message().to_string())?;
            renderer.done(&format!("renamed {session}:{index} to {name}"));
        }
        Command::SelectWindow { session, index } => {
            controller
                .select_window(conn, &session, index)
                .await
                .map_err(|e| e.message().to_string())?;
        }
        Command::Split { target, vertical } => {
            let direction = if vertical {
                SplitDirection::Vertical
            } else {
                SplitDirection::Horizontal
            };
            controller
                .split_pane(conn, &target, direction)
                .await
                .map_err(|e| e.message().to_string())?;
        }
        Command::KillPane { panes } => {
            let report = controller.kill_panes(conn, &panes).await;
            finish_batch(renderer, &report, "pane", "closed")?;
        }
        Command::SelectPane { pane } => {
            controller
                .select_pane(conn, &pane)
                .await
                .map_err(|e| e.message().to_string())?;
        }
        Command::SwapPane { pane, direction } => {
            controller
                .swap_pane(conn, &pane, direction.into())
                .await
                .map_err(|e| e.message().to_string())?;
        }
        Command::ResizePane {
            pane,
            direction,
            amount,
        } => {
            let amount = amount.unwrap_or(config.tmux.resize_amount);
            controller
                .resize_pane(conn, &pane, direction.into(), amount)
                .await
                .map_err(|e| e.message().to_string())?;
        }
        Command::Mouse { action } => {
            let enabled = match action {
                MouseAction::On => {
                    controller
                        .enable_mouse_mode(conn)
                        .await
                        .map_err(|e| e.message().to_string())?;
                    true
                }
                MouseAction::Off => {
                    controller
                        .disable_mouse_mode(conn)
                        .await
                        .map_err(|e| e.message().to_string())?;
                    false
                }
                MouseAction::Toggle => controller
                    .toggle_mouse_mode(conn)
                    .await
                    .map_err(|e| e.message().to_string())?,
                MouseAction::Status => controller.is_mouse_enabled(conn).await,
            };
            renderer.raw(if enabled { "mouse on" } else { "mouse off" });
        }
        Command::Attach { .. } | Command::Watch { .. } => {}
    }
    Ok(())
}

/// Print the batch summary; any failed item makes the command fail.
fn finish_batch(
    renderer: Renderer,
    report: &BatchReport,
    noun: &str,
    verb: &str,
) -> Result<(), String> {
    let summary = report.summary(noun, verb);
    if report.failed() > 0 {
        return Err(summary);
    }
    renderer.done(&summary);
    Ok(())
}

/// Print events until Ctrl-C.
async fn watch(config: &Config, renderer: Renderer, kinds: Vec<cli::WatchKind>) -> Result<(), String> {
    let kinds: Vec<EventKind> = if kinds.is_empty() {
        EventKind::ALL.to_vec()
    } else {
        kinds.into_iter().map(EventKind::from).collect()
    };

    let client = StreamEventClient::with_backoff(config.server.url.clone(), config.events.backoff());
    let subscriptions: Vec<_> = kinds
        .into_iter()
        .map(|kind| client.on(kind, move || renderer.event(kind)))
        .collect();

    let mut states = client.watch_state();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *states.borrow_and_update();
                renderer.connection_state(state);
            }
        }
    }

    for subscription in subscriptions {
        subscription.dispose();
    }
    client.dispose();
    Ok(())
}
