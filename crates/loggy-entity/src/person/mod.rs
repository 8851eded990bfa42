//! Person (account) entities.

pub mod model;

pub use model::{NewPerson, Person};
