//! Pattern formatter for generated source text.
//!
//! Patterns are plain strings with `{Name}` placeholders. Formatting is a
//! single left-to-right pass that copies literal text verbatim and replaces
//! each recognised placeholder with its value from a
//! [`SubstitutionMap`](holdgen_core::SubstitutionMap). Anything that is not a
//! recognised placeholder, including stray braces in generated code, is kept
//! as is.
//!
//! ## Components
//!
//! - [`PatternFormatter`]: configured formatter ([`FormatStyle::Simple`] or [`FormatStyle::Robust`])
//! - [`format_simple`] / [`format_robust`]: formatting with default bounds
//! - [`scan_placeholders`] / [`Coverage`]: find placeholders and check a map against them

mod cursor;
mod formatter;
mod scan;
mod span;

pub use cursor::Cursor;
pub use formatter::{
    FormatStyle, PatternFormatter, SIMPLE_MAX_PLACEHOLDER_LEN, format_robust, format_simple,
};
pub use scan::{Coverage, Placeholder, scan_placeholders};
pub use span::Span;
