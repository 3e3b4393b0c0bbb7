//! Tree walking, filtering and aggregation for ctxsnap.
//!
//! The pipeline is a single pass: the walker enumerates files under the
//! project root (pruning excluded directories before descent), the
//! extension filter decides inclusion per file, and the aggregator
//! writes one header+content record per included file into the output
//! snapshot. Read failures become inline placeholders; the pass always
//! continues to the next file.

pub mod aggregate;
pub mod config;
mod error;
pub mod filter;
pub mod walker;

pub use aggregate::{aggregate, Aggregation, FileContent, FileRecord};
pub use config::RunConfig;
pub use error::{CoreError, CoreResult};
pub use filter::ExtensionFilter;
pub use walker::Walker;
