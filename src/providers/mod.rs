//! Services the lookup pipeline depends on but does not own.

pub mod dns;
pub mod extract;

pub use dns::{ReverseDns, SystemReverseDns};
pub use extract::{ExtractResult, PublicSuffixExtractor, SuffixExtractor};
