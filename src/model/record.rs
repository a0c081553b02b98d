//! Parsed log records.

use crate::model::NodeId;
use chrono::{DateTime, Utc};
use std::fmt;

/// Direction of a failure relative to the node that reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The source node failed to send to the destination.
    Send,
    /// The destination node failed to receive from the source.
    Receive,
}

impl ErrorKind {
    /// Token used for this kind in log lines.
    pub fn token(self) -> &'static str {
        match self {
            ErrorKind::Send => "send_error",
            ErrorKind::Receive => "receive_error",
        }
    }

    /// Parse the log-line token for an error kind.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "send_error" => Some(ErrorKind::Send),
            "receive_error" => Some(ErrorKind::Receive),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Timestamp token exactly as it appeared in the log.
///
/// Log producers disagree on formats, so the token is kept verbatim and only
/// interpreted on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw, non-empty timestamp token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The token as written in the log.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the token as an RFC 3339 instant, if it is one.
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed failure line.
///
/// Created by the parser and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    source: NodeId,
    destination: NodeId,
    kind: ErrorKind,
    timestamp: Timestamp,
    count: u64,
}

impl LogRecord {
    /// Create a record. `count` is the number of failures the line stands for.
    pub fn new(
        source: NodeId,
        destination: NodeId,
        kind: ErrorKind,
        timestamp: Timestamp,
        count: u64,
    ) -> Self {
        Self {
            source,
            destination,
            kind,
            timestamp,
            count,
        }
    }

    /// Sending side of the connection.
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// Receiving side of the connection.
    pub fn destination(&self) -> &NodeId {
        &self.destination
    }

    /// Send or receive failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// When the failure was logged.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// How many failures the line stands for.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The node credited with this failure.
    ///
    /// Send failures belong to the sender, receive failures to the receiver.
    pub fn reporter(&self) -> &NodeId {
        match self.kind {
            ErrorKind::Send => &self.source,
            ErrorKind::Receive => &self.destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    #[test]
    fn error_kind_tokens_round_trip() {
        for kind in [ErrorKind::Send, ErrorKind::Receive] {
            assert_eq!(ErrorKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(ErrorKind::from_token("SEND_ERROR"), None);
    }

    #[test]
    fn timestamp_rejects_empty() {
        assert!(Timestamp::new("").is_none());
    }

    #[test]
    fn timestamp_parses_rfc3339() {
        let ts = Timestamp::new("2020-09-10T12:30:00+02:00").unwrap();
        let parsed = ts.parsed().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-09-10T10:30:00+00:00");
    }

    #[test]
    fn timestamp_keeps_free_form_tokens() {
        let ts = Timestamp::new("t1").unwrap();
        assert_eq!(ts.as_str(), "t1");
        assert!(ts.parsed().is_none());
    }

    #[test]
    fn reporter_follows_error_kind() {
        let ts = Timestamp::new("t").unwrap();
        let send = LogRecord::new(node("a"), node("b"), ErrorKind::Send, ts.clone(), 1);
        let recv = LogRecord::new(node("a"), node("b"), ErrorKind::Receive, ts, 1);

        assert_eq!(send.reporter(), &node("a"));
        assert_eq!(recv.reporter(), &node("b"));
    }
}
