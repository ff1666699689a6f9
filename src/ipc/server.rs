//! Unix domain socket server for the control surface
//!
//! Serves the shell's method surface to a front-end process. Requests are
//! serialized through one mutex-guarded shell, which also enforces the
//! single-caller discipline hotkey reconfiguration requires.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::autostart::Autostart;
use crate::hotkey::{HotkeyBackend, HotkeyBinding, KeyCode, Modifier, ModifierSet};
use crate::shell::Shell;
use crate::window::{Window, WindowBounds};

use super::protocol::{Request, Response, ShellStatus};

/// Upper bound on a single message frame.
const MAX_FRAME: usize = 1024 * 1024;

/// Control-surface server handling front-end connections.
pub struct Server<B: HotkeyBackend, W: Window, A: Autostart> {
    socket_path: PathBuf,
    listener: Option<UnixListener>,
    shell: Arc<Mutex<Shell<B, W, A>>>,
    start_time: Instant,
    shutdown_tx: broadcast::Sender<()>,
}

impl<B, W, A> Server<B, W, A>
where
    B: HotkeyBackend,
    W: Window,
    A: Autostart + 'static,
{
    /// Bind the control socket and take ownership of the shell.
    pub fn new(socket_path: &Path, shell: Shell<B, W, A>) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create socket directory")?;
        }

        // Remove stale socket if it exists
        if socket_path.exists() {
            std::fs::remove_file(socket_path).context("failed to remove stale socket")?;
        }

        let listener = UnixListener::bind(socket_path).context("failed to bind Unix socket")?;

        // Socket is owner-only (0600)
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let (shutdown_tx, _) = broadcast::channel(1);

        info!(?socket_path, "control surface listening");

        Ok(Self {
            socket_path: socket_path.to_owned(),
            listener: Some(listener),
            shell: Arc::new(Mutex::new(shell)),
            start_time: Instant::now(),
            shutdown_tx,
        })
    }

    /// Shared handle to the shell, for embedders that also drive it directly.
    pub fn shell(&self) -> Arc<Mutex<Shell<B, W, A>>> {
        Arc::clone(&self.shell)
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> Result<()> {
        let listener = self.listener.as_ref().context("server not initialized")?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("front-end connected");
                    let shell = Arc::clone(&self.shell);
                    let start_time = self.start_time;
                    let mut shutdown_rx = self.shutdown_tx.subscribe();

                    tokio::spawn(async move {
                        tokio::select! {
                            result = Self::handle_client(stream, shell, start_time) => {
                                if let Err(e) = result {
                                    warn!(?e, "client handler error");
                                }
                            }
                            _ = shutdown_rx.recv() => {
                                debug!("client handler shutting down");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(?e, "accept error");
                }
            }
        }
    }

    /// Handle a single front-end connection.
    async fn handle_client(
        mut stream: UnixStream,
        shell: Arc<Mutex<Shell<B, W, A>>>,
        start_time: Instant,
    ) -> Result<()> {
        let mut len_buf = [0u8; 4];

        loop {
            // Read message length (4-byte little-endian)
            match stream.read_exact(&mut len_buf).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("front-end disconnected");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len > MAX_FRAME {
                warn!(len, "message too large, disconnecting");
                return Ok(());
            }

            // Read message body
            let mut msg_buf = vec![0u8; len];
            stream.read_exact(&mut msg_buf).await?;

            // Parse request
            let request: Request =
                serde_json::from_slice(&msg_buf).context("failed to parse request")?;

            debug!(?request, "received request");

            let response = Self::process_request(request, &shell, start_time).await;

            Self::send_message(&mut stream, &response).await?;
        }
    }

    /// Send a length-prefixed JSON message.
    async fn send_message<T: serde::Serialize>(stream: &mut UnixStream, msg: &T) -> Result<()> {
        let msg_bytes = serde_json::to_vec(msg)?;
        let msg_len = (msg_bytes.len() as u32).to_le_bytes();

        stream.write_all(&msg_len).await?;
        stream.write_all(&msg_bytes).await?;

        Ok(())
    }

    /// Process a request against the shell.
    async fn process_request(
        request: Request,
        shell: &Arc<Mutex<Shell<B, W, A>>>,
        start_time: Instant,
    ) -> Response {
        match request {
            Request::Ping => Response::Pong,

            Request::GetStatus => {
                let shell = shell.lock().await;
                Response::Status(ShellStatus {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    hotkey: shell.active_hotkey().map(|b| b.to_string()),
                    visible: shell.is_visible(),
                    uptime_secs: start_time.elapsed().as_secs(),
                })
            }

            Request::ListKeys => Response::Keys {
                modifiers: Modifier::ALL.iter().map(|m| m.name().to_string()).collect(),
                keys: KeyCode::ALL.iter().map(|k| k.name().to_string()).collect(),
            },

            Request::SetHotkey { modifiers, key } => {
                let binding = match parse_binding(&modifiers, &key) {
                    Ok(binding) => binding,
                    Err(message) => {
                        return Response::Error {
                            code: "binding".to_string(),
                            message,
                        }
                    }
                };
                match shell.lock().await.set_toggle_hotkey(binding).await {
                    Ok(()) => Response::Ack,
                    Err(err) => Response::Error {
                        code: "hotkey".to_string(),
                        message: err.to_string(),
                    },
                }
            }

            Request::ClearHotkey => match shell.lock().await.clear_toggle_hotkey().await {
                Ok(()) => Response::Ack,
                Err(err) => Response::Error {
                    code: "hotkey".to_string(),
                    message: err.to_string(),
                },
            },

            Request::GetAutostart => {
                let enabled = shell.lock().await.autostart_enabled();
                Response::Autostart { enabled }
            }

            Request::SetAutostart { enabled } => {
                match shell.lock().await.set_autostart_enabled(enabled) {
                    Ok(()) => Response::Ack,
                    Err(err) => Response::Error {
                        code: "autostart".to_string(),
                        message: err.to_string(),
                    },
                }
            }

            Request::CheckUpdate => {
                // The fetch blocks; run it on the blocking pool with the lock released
                let checker = shell.lock().await.update_checker();
                let update = tokio::task::spawn_blocking(move || checker.check_for_update())
                    .await
                    .unwrap_or_else(|err| {
                        warn!(?err, "update check task failed");
                        None
                    });
                Response::Update { update }
            }

            Request::SetBounds {
                x,
                y,
                width,
                height,
            } => {
                shell
                    .lock()
                    .await
                    .set_window_bounds(WindowBounds::new(x, y, width, height));
                Response::Ack
            }

            Request::BeforeClose => {
                let prevent = shell.lock().await.capture_before_close();
                Response::CloseDecision { prevent }
            }
        }
    }

    /// Gracefully shutdown the server.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        // Remove socket file
        if self.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket_path) {
                warn!(?e, "failed to remove socket file");
            }
        }

        info!("control surface shutdown complete");
    }
}

fn parse_binding(modifiers: &[String], key: &str) -> Result<HotkeyBinding, String> {
    let mut mods = ModifierSet::empty();
    for raw in modifiers {
        let modifier: Modifier = raw.parse().map_err(|e: crate::hotkey::BindingParseError| e.to_string())?;
        mods.insert(modifier);
    }
    let key: KeyCode = key.parse().map_err(|e: crate::hotkey::BindingParseError| e.to_string())?;
    Ok(HotkeyBinding::new(mods, key))
}
