//! Deterministic step-to-action translation

pub mod table;

pub use table::{PoseTriplet, TranslationTable};
