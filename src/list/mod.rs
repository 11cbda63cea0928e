pub mod corpus;
pub mod exclusions;
pub mod line;

// Re-export main types and functions
pub use corpus::{Corpus, Variant};
pub use exclusions::ExclusionList;
pub use line::{EXCLUSION_MARKER, Line, classify};
