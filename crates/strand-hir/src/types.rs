//! Type system for Strand script.
//!
//! This module defines the value types the compiler reasons about: builtin
//! scalars, lists, enums and module classes.

mod class;
mod enum_type;
mod ty;

pub use class::ClassType;
pub use enum_type::{BackingType, EnumMember, EnumType, Literal};
pub use ty::Ty;
