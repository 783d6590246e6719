//! Grammar rules, split by syntactic category.

mod expressions;
mod items;
mod statements;
