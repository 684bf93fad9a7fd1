//! Numeric helpers shared by the pipeline.

pub mod safe_cast;
