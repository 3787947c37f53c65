use crate::core::{Dataset, ReportError, Voter, validate_voter};
use crate::engine::{EngineOptions, ReportExecutor};
use crate::network::protocol::{Command, Reply};
use crate::storage::ReportStore;
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Longest request line a client may send
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Shared state handed to every connection
#[derive(Clone)]
pub struct ServerState {
    pub dataset: Arc<Dataset<Voter>>,
    pub store: Arc<Mutex<ReportStore>>,
    pub options: EngineOptions,
    pub max_line_bytes: usize,
}

impl ServerState {
    #[must_use]
    pub fn new(dataset: Dataset<Voter>, store: ReportStore, options: EngineOptions) -> Self {
        Self {
            dataset: Arc::new(dataset),
            store: Arc::new(Mutex::new(store)),
            options,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    #[must_use]
    pub const fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Run a store operation on the blocking pool; snapshot writes touch the disk
    async fn with_store<T, F>(&self, op: F) -> Result<T, ReportError>
    where
        F: FnOnce(&mut ReportStore) -> Result<T, ReportError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&mut store.blocking_lock()))
            .await
            .map_err(|e| ReportError::Io(std::io::Error::other(e)))?
    }

    /// Decode and execute one request line
    pub async fn handle_line(&self, line: &str) -> Reply {
        let outcome = match Command::from_line(line) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(result) => Reply::success(result),
            Err(e) => {
                debug!(kind = e.kind(), error = %e, "command failed");
                Reply::failure(&e)
            }
        }
    }

    async fn dispatch(&self, command: Command) -> Result<serde_json::Value, ReportError> {
        let result = match command {
            Command::Run { request } => {
                let response = ReportExecutor::run(&self.dataset.records, &request, &self.options)?;
                serde_json::to_value(response)?
            }
            Command::SaveReport { report } => {
                serde_json::to_value(self.with_store(move |store| store.create(report)).await?)?
            }
            Command::GetReport { id } => {
                serde_json::to_value(self.with_store(move |store| store.get(id).cloned()).await?)?
            }
            Command::ListReports { public_only } => {
                let reports = self
                    .with_store(move |store| Ok(store.list(public_only).into_iter().cloned().collect::<Vec<_>>()))
                    .await?;
                serde_json::to_value(reports)?
            }
            Command::UpdateReport { id, update } => {
                serde_json::to_value(self.with_store(move |store| store.update(id, update)).await?)?
            }
            Command::DeleteReport { id } => {
                serde_json::to_value(self.with_store(move |store| store.delete(id)).await?)?
            }
            Command::RunSaved { id, page, per_page } => {
                // The store stays unlocked while the report runs
                let request = self
                    .with_store(move |store| Ok(store.get(id)?.request(page, per_page)))
                    .await?;
                let response = ReportExecutor::run(&self.dataset.records, &request, &self.options)?;
                self.with_store(move |store| store.record_usage(id)).await?;
                serde_json::to_value(response)?
            }
            Command::ValidateVoter { voter } => {
                let violations = validate_voter(&voter);
                json!({ "valid": violations.is_empty(), "violations": violations })
            }
            Command::Ping => json!("pong"),
        };
        Ok(result)
    }
}

pub struct Server {
    state: ServerState,
}

impl Server {
    #[must_use]
    pub const fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn start(&self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        println!("
╔══════════════════════════════════════════════════════════╗
║       reportql server is ready                           ║
║                                                          ║
║  Listening on: {:<41} ║
╚══════════════════════════════════════════════════════════╝
", addr);
        self.serve(listener).await?;
        Ok(())
    }

    /// Accept connections forever on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        info!(
            dataset = %self.state.dataset.name,
            records = self.state.dataset.len(),
            chaining = ?self.state.options.chain_mode,
            "accepting connections"
        );

        loop {
            let (socket, addr) = listener.accept().await?;
            info!(%addr, "new connection");

            let state = self.state.clone();
            tokio::spawn(async move {
                if let Err(e) = Self::handle_client(socket, state).await {
                    warn!(%addr, error = %e, "error handling client");
                }
            });
        }
    }

    async fn handle_client(
        mut socket: TcpStream,
        state: ServerState,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (reader, mut writer) = socket.split();
        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        let limit = state.max_line_bytes;

        loop {
            line.clear();
            let n = (&mut reader).take(limit as u64).read_until(b'\n', &mut line).await?;

            if n == 0 {
                break;
            }

            let reply = if n == limit && line.last() != Some(&b'\n') {
                skip_line(&mut reader).await?;
                warn!(limit, "request line too long");
                Reply::failure(&ReportError::InvalidArgument(format!(
                    "request line exceeds {limit} bytes"
                )))
            } else {
                match std::str::from_utf8(&line) {
                    Ok(text) if text.trim().is_empty() => continue,
                    Ok(text) => state.handle_line(text.trim()).await,
                    Err(_) => Reply::failure(&ReportError::InvalidArgument(
                        "request line is not valid UTF-8".to_string(),
                    )),
                }
            };
            writer.write_all(reply.to_line().as_bytes()).await?;
            writer.flush().await?;
        }

        debug!("client disconnected");
        Ok(())
    }
}

/// Discard input up to and including the next newline
async fn skip_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = buf.len();
        reader.consume(len);
    }
}
