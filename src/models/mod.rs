//! Data models for reverse lookup results.
//!
//! This module contains the contact record a provider returns and the builder
//! providers use to assemble it.

pub mod builder;
pub mod contact;

pub use builder::ContactRecordBuilder;
pub use contact::{
    Address, AddressType, ContactPhone, ContactRecord, ContactSource, Name, PhoneType,
    PhotoReference, Website, WebsiteType,
};
