//! Image compositing: background + logo + captions -> finished post
//!
//! The compositor is a pure in-memory transformation. Decoding inputs and
//! encoding/packaging outputs belong to the orchestration layer.

pub mod compositor;
pub mod text;
