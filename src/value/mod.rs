//! Typed flag values.
//!
//! This module provides:
//! - Flag type tags ([`FlagType`])
//! - Native values ([`Value`]) and the types that back them ([`Native`])
//! - Typed value adapters ([`TypedValue`], [`ScalarValue`], [`OptionalValue`], [`SliceValue`])
//! - Bound value handles ([`Bound`])
//! - The duration literal codec ([`parse_duration`], [`format_duration`])

mod adapter;
mod duration;
mod kind;
mod native;

pub use adapter::{Bound, OptionalValue, ScalarValue, SliceValue, TypedValue};
pub use duration::{format_duration, parse_duration};
pub use kind::FlagType;
pub use native::{Native, Value};
