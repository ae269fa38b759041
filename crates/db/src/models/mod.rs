//! Row models and request DTOs, one module per aggregate.

pub mod asset;
pub mod history;
pub mod lot;
pub mod reference;
