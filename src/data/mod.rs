//! Core data structures for abundance evaluation.

pub(crate) mod paired;
mod table;

pub use paired::PairedSample;
pub use table::{AbundanceTable, ObservationTable};
