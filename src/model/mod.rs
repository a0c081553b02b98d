//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod malformed_line;
pub mod metric;
pub mod record;
pub mod stats;
pub mod summary;

// Re-export for convenience
pub use error::{AppError, InputError, OutputError, ParseError};
pub use identifiers::{InvalidNodeId, NodeId};
pub use key_action::KeyAction;
pub use malformed_line::MalformedLine;
pub use metric::{Metric, UnknownMetric};
pub use record::{ErrorKind, LogRecord, Timestamp};
pub use stats::{Aggregate, EdgeStats, NodeStats, RankedEntry, RankedList, DEFAULT_TOP_N};
pub use summary::Summary;
