mod effects;
mod reconciler;

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::{sleep_until, Instant};
use winkeep_proto::{Action, SessionStatus};

use crate::core::{Config, HeightDelta, WindowState};
use crate::headless::{HeadlessConfig, HeadlessWindow};
use crate::persistence::SnapshotStore;

pub use effects::execute_effects;
pub use reconciler::Reconciler;

pub struct App {}

impl App {
    /// Run a headless session driven by JSON-lines actions on stdin.
    pub fn run<S: SnapshotStore>(config: Config, headless: HeadlessConfig, store: S) -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut stdout = std::io::stdout();
        let state = rt.block_on(run_session(
            &config,
            headless,
            store,
            tokio::io::stdin(),
            &mut stdout,
        ))?;

        tracing::info!("Session ended in {} mode", state.mode);
        Ok(())
    }
}

/// Drive one session until input ends, `quit` is read, or Ctrl-C.
///
/// Window notifications are always handled before the next input line, so
/// the reconciler sees the consequences of an action before the following
/// one. At end of input a pending settled resize is waited for; `quit` and
/// Ctrl-C stop immediately. The record is saved once more before returning.
pub async fn run_session<S, R, O>(
    config: &Config,
    headless: HeadlessConfig,
    store: S,
    input: R,
    out: &mut O,
) -> Result<WindowState>
where
    S: SnapshotStore,
    R: AsyncRead + Unpin,
    O: Write,
{
    let (window, mut notifications) = HeadlessWindow::new(headless);
    let mut reconciler = Reconciler::new(window, store, config);
    if let Err(e) = reconciler.init() {
        tracing::warn!("Continuing without saved window state: {}", e);
    }

    let mut lines = BufReader::new(input).lines();
    let mut input_open = true;
    let mut paused_until: Option<Instant> = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if !input_open {
            while let Ok(event) = notifications.try_recv() {
                reconciler.handle_event(event);
            }
            if reconciler.deadline().is_none() {
                break;
            }
        }

        let deadline = reconciler.deadline();
        let accepting = input_open && paused_until.is_none();

        tokio::select! {
            biased;

            Some(event) = notifications.recv() => reconciler.handle_event(event),
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                reconciler.poll_settled(Instant::now());
            }
            _ = sleep_until(paused_until.unwrap_or_else(Instant::now)), if paused_until.is_some() => {
                paused_until = None;
            }
            line = lines.next_line(), if accepting => match line? {
                Some(line) => match parse_action(&line) {
                    Some(Action::Quit) => {
                        tracing::info!("Quit requested");
                        break;
                    }
                    Some(Action::Wait { ms }) => {
                        paused_until = Some(Instant::now() + Duration::from_millis(ms));
                    }
                    Some(action) => handle_action(&mut reconciler, &action, out)?,
                    None => {}
                },
                None => {
                    tracing::debug!("End of input");
                    input_open = false;
                }
            },
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    if let Err(e) = reconciler.save() {
        tracing::warn!("Failed to save window state on exit: {}", e);
    }
    Ok(reconciler.state().clone())
}

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(action) => Some(action),
        Err(e) => {
            tracing::warn!("Ignoring invalid action {:?}: {}", line, e);
            None
        }
    }
}

fn handle_action<S, O>(
    reconciler: &mut Reconciler<HeadlessWindow, S>,
    action: &Action,
    out: &mut O,
) -> Result<()>
where
    S: SnapshotStore,
    O: Write,
{
    match action {
        Action::Save => {
            if let Err(e) = reconciler.save() {
                tracing::warn!("Save failed: {}", e);
            }
        }
        Action::Status => {
            serde_json::to_writer(&mut *out, &session_status(reconciler))?;
            writeln!(out)?;
            out.flush()?;
        }
        action => reconciler.window().apply_action(action),
    }
    Ok(())
}

fn session_status<S: SnapshotStore>(reconciler: &Reconciler<HeadlessWindow, S>) -> SessionStatus {
    let state = reconciler.state();
    SessionStatus {
        mode: state.mode.to_string(),
        height_delta: match state.height_delta {
            HeightDelta::Learned(delta) => Some(delta),
            HeightDelta::Unknown => None,
        },
        resize_pending: reconciler.resize_pending(),
        visible: reconciler.window().is_visible(),
        snapshot: state.snapshot.clone(),
    }
}

#[cfg(test)]
mod tests {
    use winkeep_proto::SnapshotMode;

    use super::*;
    use crate::core::{Frame, WindowMode};
    use crate::persistence::MemoryStore;

    const WAIT: &str = "{\"type\":\"wait\",\"ms\":2000}\n";

    async fn run_script(
        headless: HeadlessConfig,
        store: MemoryStore,
        script: &str,
    ) -> (WindowState, String) {
        let config = Config::new();
        let mut out = Vec::new();
        let state = run_session(&config, headless, store, script.as_bytes(), &mut out)
            .await
            .unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_saves_resized_geometry() {
        let store = MemoryStore::new();
        let script = r#"{"type":"move","x":50,"y":60}
{"type":"resize","width":1000,"height":700,"steps":5}
"#;
        let (state, _) = run_script(HeadlessConfig::default(), store.clone(), script).await;

        assert_eq!(state.mode, WindowMode::Normal);
        assert_eq!(
            store.blob().as_deref(),
            Some(r#"{"mode":"normal","x":50,"y":60,"width":1000,"height":700}"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_maximized_exit_keeps_normal_geometry() {
        let store = MemoryStore::new();
        let (state, _) = run_script(
            HeadlessConfig::default(),
            store.clone(),
            "{\"type\":\"maximize\"}\n",
        )
        .await;

        assert_eq!(state.mode, WindowMode::Maximized);
        assert!(!state.pending_maximize_ack);
        assert_eq!(
            store.blob().as_deref(),
            Some(r#"{"mode":"maximized","x":100,"y":100,"width":800,"height":600}"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_height_is_learned_once_and_stays_stable() {
        let headless = HeadlessConfig {
            frame_height: 20,
            ..Default::default()
        };
        let store =
            MemoryStore::with_blob(r#"{"mode":"normal","x":10,"y":10,"width":1024,"height":700}"#);
        let learned = r#"{"mode":"normal","x":10,"y":10,"width":1024,"height":720,"deltaHeight":20}"#;

        let (state, _) = run_script(headless.clone(), store.clone(), "").await;
        assert_eq!(state.height_delta, HeightDelta::Learned(20));
        assert_eq!(store.blob().as_deref(), Some(learned));

        // A second launch restores to the same visual size and saves the same record
        let (state, _) = run_script(headless, store.clone(), "").await;
        assert_eq!(state.height_delta, HeightDelta::Learned(20));
        assert_eq!(store.blob().as_deref(), Some(learned));
    }

    #[tokio::test(start_paused = true)]
    async fn test_maximized_record_survives_restarts() {
        let store = MemoryStore::new();
        let maximized = r#"{"mode":"maximized","x":100,"y":100,"width":800,"height":600}"#;

        run_script(HeadlessConfig::default(), store.clone(), "{\"type\":\"maximize\"}\n").await;
        assert_eq!(store.blob().as_deref(), Some(maximized));

        for _ in 0..2 {
            let (state, _) = run_script(HeadlessConfig::default(), store.clone(), WAIT).await;
            assert_eq!(state.mode, WindowMode::Maximized);
            assert_eq!(state.height_delta, HeightDelta::Unknown);
            assert_eq!(store.blob().as_deref(), Some(maximized));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fullscreen_record_survives_restarts() {
        let store = MemoryStore::new();
        let fullscreen = r#"{"mode":"fullscreen","x":100,"y":100,"width":800,"height":600}"#;

        run_script(
            HeadlessConfig::default(),
            store.clone(),
            "{\"type\":\"enter_fullscreen\"}\n",
        )
        .await;
        assert_eq!(store.blob().as_deref(), Some(fullscreen));

        let (state, _) = run_script(HeadlessConfig::default(), store.clone(), WAIT).await;
        assert_eq!(state.mode, WindowMode::Fullscreen);
        assert_eq!(store.blob().as_deref(), Some(fullscreen));

        // Leaving fullscreen learns from normal geometry only
        let script = r#"{"type":"wait","ms":2000}
{"type":"leave_fullscreen"}
{"type":"wait","ms":2000}
"#;
        let (state, _) = run_script(HeadlessConfig::default(), store.clone(), script).await;
        assert_eq!(state.mode, WindowMode::Normal);
        assert_eq!(state.height_delta, HeightDelta::Learned(0));
        assert_eq!(
            store.blob().as_deref(),
            Some(r#"{"mode":"normal","x":100,"y":100,"width":800,"height":600}"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmaximize_corrects_window_manager_drift() {
        let headless = HeadlessConfig {
            unmaximize_drift: (30, 30),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let script = r#"{"type":"move","x":200,"y":150}
{"type":"resize","width":900,"height":650}
{"type":"wait","ms":1000}
{"type":"maximize"}
{"type":"wait","ms":1000}
{"type":"unmaximize"}
{"type":"wait","ms":1000}
"#;
        let (state, _) = run_script(headless, store.clone(), script).await;

        assert_eq!(state.mode, WindowMode::Normal);
        assert_eq!(
            store.blob().as_deref(),
            Some(r#"{"mode":"normal","x":200,"y":150,"width":900,"height":650}"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_session() {
        let script = r#"{"type":"minimize"}
{"type":"status"}
"#;
        let (_, out) = run_script(HeadlessConfig::default(), MemoryStore::new(), script).await;

        let status: SessionStatus = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(status.mode, "minimized");
        assert_eq!(status.height_delta, Some(0));
        assert!(!status.resize_pending);
        assert!(status.visible);
        assert_eq!(status.snapshot.mode, SnapshotMode::Normal);
        assert_eq!(status.snapshot.width, Some(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_reading_and_skips_invalid_lines() {
        let store = MemoryStore::new();
        let script = r#"not json
{"type":"shade"}
{"type":"quit"}
{"type":"maximize"}
"#;
        let (state, _) = run_script(HeadlessConfig::default(), store.clone(), script).await;

        assert_eq!(state.mode, WindowMode::Normal);
        assert_eq!(store.save_count(), 1);
        assert_eq!(state.snapshot.mode, SnapshotMode::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_action_writes_before_exit() {
        let store = MemoryStore::new();
        let script = r#"{"type":"save"}
"#;
        let (state, _) = run_script(HeadlessConfig::default(), store.clone(), script).await;

        // Once for the action, once on exit
        assert_eq!(store.save_count(), 2);
        assert_eq!(
            state.snapshot.width.zip(state.snapshot.height),
            Some(Frame::new(100, 100, 800, 600).size())
        );
    }
}
