//! The error metric a view displays.

use std::fmt;
use std::str::FromStr;

/// Which failures a figure or ranking counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Send failures only.
    Send,
    /// Receive failures only.
    Receive,
    /// Send and receive failures together.
    #[default]
    Combined,
}

impl Metric {
    /// All metrics in selector order.
    pub const ALL: [Metric; 3] = [Metric::Send, Metric::Receive, Metric::Combined];

    /// Human-readable label, as shown in the selector and the colour bar.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Send => "Send",
            Metric::Receive => "Receive",
            Metric::Combined => "Send+Receive",
        }
    }

    /// Pick the value for this metric out of a (send, receive) pair.
    ///
    /// Combined saturates at `u64::MAX`.
    pub fn select(self, send: u64, receive: u64) -> u64 {
        match self {
            Metric::Send => send,
            Metric::Receive => receive,
            Metric::Combined => send.saturating_add(receive),
        }
    }

    /// Next metric in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Metric::Send => Metric::Receive,
            Metric::Receive => Metric::Combined,
            Metric::Combined => Metric::Send,
        }
    }

    /// Previous metric in selector order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Metric::Send => Metric::Combined,
            Metric::Receive => Metric::Send,
            Metric::Combined => Metric::Receive,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A metric name that is none of the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}' (expected send, receive or combined)")]
pub struct UnknownMetric(
    /// The rejected input.
    pub String,
);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "send" => Ok(Metric::Send),
            "receive" | "recv" => Ok(Metric::Receive),
            "combined" | "total" | "send+receive" => Ok(Metric::Combined),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_picks_the_right_component() {
        assert_eq!(Metric::Send.select(2, 5), 2);
        assert_eq!(Metric::Receive.select(2, 5), 5);
        assert_eq!(Metric::Combined.select(2, 5), 7);
        assert_eq!(Metric::Combined.select(u64::MAX, 5), u64::MAX);
    }

    #[test]
    fn next_and_prev_cycle_through_all_metrics() {
        let mut metric = Metric::Send;
        for _ in 0..Metric::ALL.len() {
            assert_eq!(metric.next().prev(), metric);
            metric = metric.next();
        }
        assert_eq!(metric, Metric::Send);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("send".parse::<Metric>(), Ok(Metric::Send));
        assert_eq!("Receive".parse::<Metric>(), Ok(Metric::Receive));
        assert_eq!("send+receive".parse::<Metric>(), Ok(Metric::Combined));
        assert!("both".parse::<Metric>().is_err());
    }

    #[test]
    fn default_is_combined() {
        assert_eq!(Metric::default(), Metric::Combined);
    }
}
