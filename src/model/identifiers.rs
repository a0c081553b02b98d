//! Node identifier newtype with a smart constructor.
//!
//! Nodes are either IPv4 addresses or hostname tokens. The raw enum
//! variants are public for pattern matching, but values from log input
//! must go through [`NodeId::parse`].

use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Longest hostname accepted, matching the DNS limit.
const MAX_HOSTNAME_LEN: usize = 253;

/// Identifier of a server in the error logs.
///
/// Ordering puts every IPv4 node first, in numeric address order, followed by
/// hostnames in lexicographic order. Layouts and rankings rely on this to
/// place neighbouring addresses next to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// IPv4 address, e.g. `10.0.0.12`.
    Ip(Ipv4Addr),
    /// Hostname token, e.g. `db-01.rack3`.
    Host(String),
}

impl NodeId {
    /// Smart constructor: validates an IPv4 address or hostname token.
    ///
    /// A token made only of digits and dots must be a valid IPv4 address;
    /// `10.0.0.256` is rejected rather than treated as a hostname.
    ///
    /// Hostnames start with a letter or digit, continue with letters, digits,
    /// `.`, `_` or `-`, and never end with `-`. The last rule keeps `a-->b`
    /// from reading as a node `a-`.
    pub fn parse(raw: &str) -> Result<Self, InvalidNodeId> {
        if raw.is_empty() {
            return Err(InvalidNodeId::Empty);
        }

        if raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return raw
                .parse::<Ipv4Addr>()
                .map(NodeId::Ip)
                .map_err(|_| InvalidNodeId::BadAddress(raw.to_string()));
        }

        if raw.len() > MAX_HOSTNAME_LEN {
            return Err(InvalidNodeId::TooLong(raw.len()));
        }

        let mut chars = raw.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !(first_ok && rest_ok) || raw.ends_with('-') {
            return Err(InvalidNodeId::BadHostname(raw.to_string()));
        }

        Ok(NodeId::Host(raw.to_string()))
    }

    /// Whether this node is identified by an IPv4 address.
    pub fn is_ip(&self) -> bool {
        matches!(self, NodeId::Ip(_))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NodeId::Ip(a), NodeId::Ip(b)) => a.cmp(b),
            (NodeId::Ip(_), NodeId::Host(_)) => Ordering::Less,
            (NodeId::Host(_), NodeId::Ip(_)) => Ordering::Greater,
            (NodeId::Host(a), NodeId::Host(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeId::parse(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Ip(addr) => write!(f, "{addr}"),
            NodeId::Host(name) => f.write_str(name),
        }
    }
}

// ===== Error Types =====

/// Why a token is not a node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNodeId {
    /// Nothing between the arrow and the surrounding whitespace.
    #[error("node identifier cannot be empty")]
    Empty,
    /// Digits and dots that do not form an IPv4 address.
    #[error("'{0}' is not a valid IPv4 address")]
    BadAddress(String),
    /// A character outside the hostname alphabet, or a bad first or last character.
    #[error("'{0}' is not a valid hostname")]
    BadHostname(String),
    /// Longer than 253 bytes.
    #[error("hostname is {0} bytes long (max 253)")]
    TooLong(usize),
}

// ===== Tests =====
