//! One module per route family.

pub mod analyze;
pub mod chat;
pub mod health;
pub mod medicine;
pub mod recommendations;
pub mod translate;
