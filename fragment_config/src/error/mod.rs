//! Error types produced while loading and assembling fragments.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{FragmentError, FragmentResult};

#[cfg(test)]
mod tests;
