//! Line channel between the host and the redraw cycle.
//!
//! A reader task forwards raw lines into an unbounded channel. The consumer
//! takes whatever has piled up since its last pass and, if several
//! snapshots arrived, renders only the newest one.

use crate::protocol::{InboundMessage, OutboundMessage};
use crate::sink::JsonLinesSink;
use goatan_core::{PlacementEngine, RedrawCycle};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A line the viewer could not act on. Logged and skipped.
#[derive(Debug, Error)]
pub enum ChannelFailure {
    #[error("malformed line: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    #[error("activation for unknown handle {0}")]
    UnknownHandle(u64),
}

/// Drop every snapshot except the last, keeping activations in order.
pub fn coalesce(batch: Vec<InboundMessage>) -> Vec<InboundMessage> {
    let last_snapshot = batch.iter().rposition(InboundMessage::is_snapshot);
    batch
        .into_iter()
        .enumerate()
        .filter(|(i, msg)| !msg.is_snapshot() || Some(*i) == last_snapshot)
        .map(|(_, msg)| msg)
        .collect()
}

/// Parse one protocol line; blank lines yield nothing
pub fn parse_line(line: &str) -> Result<Option<InboundMessage>, ChannelFailure> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|source| ChannelFailure::Malformed { source })
}

/// Redraw cycle plus the glue to the protocol
pub struct Viewer {
    cycle: RedrawCycle<JsonLinesSink>,
}

impl Viewer {
    pub fn new(engine: PlacementEngine) -> Self {
        Self {
            cycle: RedrawCycle::new(engine, JsonLinesSink::new()),
        }
    }

    /// Apply one inbound message, returning what to send back
    pub fn handle(&mut self, msg: InboundMessage) -> Vec<OutboundMessage> {
        match msg {
            InboundMessage::Snapshot(snapshot) => {
                if let Err(e) = self.cycle.redraw(&snapshot) {
                    return vec![OutboundMessage::Rejected {
                        message: e.to_string(),
                    }];
                }
                self.cycle.sink_mut().drain()
            }
            InboundMessage::Activate { handle } => match self.cycle.sink().activate(handle) {
                Some(request) => vec![OutboundMessage::PlacePiece(request.clone())],
                None => {
                    warn!("{}", ChannelFailure::UnknownHandle(handle));
                    Vec::new()
                }
            },
        }
    }
}

/// Forward every line of `input` into `tx` until EOF.
async fn read_lines<R>(input: R, tx: mpsc::UnboundedSender<String>) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if tx.send(line).is_err() {
            break;
        }
    }
    Ok(())
}

async fn write_messages<W>(output: &mut W, messages: &[OutboundMessage]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for msg in messages {
        let mut text = serde_json::to_string(msg)?;
        text.push('\n');
        output.write_all(text.as_bytes()).await?;
    }
    output.flush().await?;
    Ok(())
}

/// Run the viewer until `input` is exhausted.
pub async fn run<R, W>(input: R, mut output: W, engine: PlacementEngine) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let reader = tokio::spawn(read_lines(input, tx));
    let mut viewer = Viewer::new(engine);

    while let Some(first) = rx.recv().await {
        let mut lines = vec![first];
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }

        let mut batch = Vec::with_capacity(lines.len());
        for line in &lines {
            match parse_line(line) {
                Ok(Some(msg)) => batch.push(msg),
                Ok(None) => {}
                Err(failure) => warn!("{}", failure),
            }
        }

        let batch = coalesce(batch);
        debug!(lines = lines.len(), messages = batch.len(), "processing batch");
        for msg in batch {
            let out = viewer.handle(msg);
            write_messages(&mut output, &out).await?;
        }
    }

    reader.await??;
    info!("input closed");
    Ok(())
}
