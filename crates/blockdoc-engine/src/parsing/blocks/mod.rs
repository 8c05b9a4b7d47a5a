//! # Block Parsing
//!
//! Two-phase block parsing over the document body.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (indent level, remainder, blank status)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps at most one
//!    pending multi-line construct and emits `Block`s as constructs close
//!
//! ## Modules
//!
//! - **`kinds`**: marker knowledge for each block kind (headings, lists,
//!   quotes/callouts/toggles, fences, embeds, tables)
//! - **`classify`**: `LineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open` dispatch in precedence order
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Every line is consumed by some block; unrecognised lines are plain text
//! - Fenced code is a raw zone: lines inside are kept verbatim
//! - Only one lookahead question is ever asked: does this line continue the
//!   pending construct

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineClassifier};
pub use open::{BlockOpen, try_open};
