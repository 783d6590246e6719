//! Enum definitions and the process-wide enum registry.
//!
//! A source `enum` declaration is first lowered to an [`EnumDefinition`],
//! which the [`EnumRegistry`] validates and turns into a shared
//! [`EnumType`](crate::types::EnumType).

mod definition;
mod registry;

pub use definition::{EnumDefinition, MemberDefinition, MemberValue};
pub use registry::{qualified_name, EnumRegistry};
