//! Tag contract and standard ids.

pub mod standard;
pub mod tag;

pub use standard::StandardTag;
pub use tag::{
    ensure_fixed_size, implicit_value_size, is_implicit, is_standard, AsAny, Tag, TagExt, TagId,
};
