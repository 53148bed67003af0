//! Preset format decoding modules.
//!
//! Each format follows a layered structure:
//! - `layout`: byte offsets, lengths and magic numbers (source of truth)
//! - `reader`: sequential stream access and byte-order conventions
//! - `parser`: field validation and application to the instrument
//! - `error`: explicit, actionable errors
//!
//! Parsers borrow an already-open stream; opening and closing files is the
//! business of the `preset` layer.

pub(crate) mod common;
pub mod fxp;
