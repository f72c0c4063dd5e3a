//! Command implementations for boolir-cmd

pub mod index;
pub mod inspect;
pub mod lookup;
pub mod search;
