//! Outbound routing for mode handling.
//!
//! Handlers never write to sockets. They describe who a line is for and
//! hand it to a [`ModeSink`]; the transport resolves the audience.

use crate::handlers::mode::Visibility;
use crate::state::Uid;
use tokio::sync::mpsc;
use tracing::warn;

/// A line produced by mode handling, tagged with its audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Numeric reply to a single client.
    Reply { to: Uid, line: String },
    /// `MODE` line for local members of `channel`; `OpsOnly` restricts it to
    /// operators and half-operators.
    Channel {
        channel: String,
        audience: Visibility,
        line: String,
    },
    /// `TMODE` line for every peer server except the link that `except`
    /// (the originating client or server) is reached through.
    Servers { except: Uid, line: String },
}

impl Outbound {
    pub fn line(&self) -> &str {
        match self {
            Outbound::Reply { line, .. }
            | Outbound::Channel { line, .. }
            | Outbound::Servers { line, .. } => line,
        }
    }
}

/// Destination for everything a mode command emits.
pub trait ModeSink {
    fn emit(&mut self, out: Outbound);
}

impl ModeSink for Vec<Outbound> {
    fn emit(&mut self, out: Outbound) {
        self.push(out);
    }
}

impl ModeSink for mpsc::UnboundedSender<Outbound> {
    fn emit(&mut self, out: Outbound) {
        if let Err(e) = self.send(out) {
            warn!(line = %e.0.line(), "Failed to queue mode output: transport closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Outbound> = Vec::new();
        sink.emit(Outbound::Reply {
            to: "001AAAAAA".into(),
            line: "first".into(),
        });
        sink.emit(Outbound::Servers {
            except: "001AAAAAA".into(),
            line: "second".into(),
        });
        let lines: Vec<&str> = sink.iter().map(Outbound::line).collect();
        assert_eq!(lines, ["first", "second"]);
    }

    #[tokio::test]
    async fn channel_sink_forwards_and_survives_close() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.emit(Outbound::Reply {
            to: "001AAAAAA".into(),
            line: "hello".into(),
        });
        assert_eq!(rx.recv().await.map(|o| o.line().to_string()).as_deref(), Some("hello"));

        drop(rx);
        tx.emit(Outbound::Reply {
            to: "001AAAAAA".into(),
            line: "dropped".into(),
        });
    }
}
