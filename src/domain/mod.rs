//! Domain value objects and types.
//!
//! The lookup key is a [`PhoneNumber`]: validated at construction and never
//! mutated afterwards, so providers can share it freely.

pub mod errors;
pub mod phone;

pub use errors::ValidationError;
pub use phone::PhoneNumber;
