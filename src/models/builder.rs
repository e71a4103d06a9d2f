//! Incremental assembly of a [`ContactRecord`].

use super::contact::{
    Address, ContactPhone, ContactRecord, ContactSource, Name, PhotoReference, Website,
};

/// Accumulates the partial fields a provider extracted and produces one record.
///
/// Nothing is validated or fabricated: every emitted field was set by the caller.
///
/// # Example
///
/// ```
/// use reverse_lookup::models::{ContactRecordBuilder, ContactSource, Name, ContactPhone, PhoneType};
///
/// let mut builder = ContactRecordBuilder::new(ContactSource::ReverseLookup);
/// builder
///     .set_name(Name::new("Beijing"))
///     .add_phone_number(ContactPhone::new("+8613812345678", PhoneType::Main));
/// let record = builder.build();
/// assert_eq!(record.display_name(), Some("Beijing"));
/// ```
#[derive(Debug, Clone)]
pub struct ContactRecordBuilder {
    source: ContactSource,
    name: Option<Name>,
    phone_numbers: Vec<ContactPhone>,
    addresses: Vec<Address>,
    websites: Vec<Website>,
    photo: PhotoReference,
    is_business: bool,
    info_url: Option<String>,
}

impl ContactRecordBuilder {
    pub fn new(source: ContactSource) -> Self {
        Self {
            source,
            name: None,
            phone_numbers: Vec::new(),
            addresses: Vec::new(),
            websites: Vec::new(),
            photo: PhotoReference::None,
            is_business: false,
            info_url: None,
        }
    }

    /// Set the name, replacing any previous one.
    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.name = Some(name);
        self
    }

    pub fn add_phone_number(&mut self, phone: ContactPhone) -> &mut Self {
        self.phone_numbers.push(phone);
        self
    }

    pub fn add_address(&mut self, address: Address) -> &mut Self {
        self.addresses.push(address);
        self
    }

    pub fn add_website(&mut self, website: Website) -> &mut Self {
        self.websites.push(website);
        self
    }

    /// Set the photo, replacing any previous one.
    pub fn set_photo_reference(&mut self, photo: PhotoReference) -> &mut Self {
        self.photo = photo;
        self
    }

    pub fn set_business(&mut self, is_business: bool) -> &mut Self {
        self.is_business = is_business;
        self
    }

    pub fn set_info_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.info_url = Some(url.into());
        self
    }

    /// Snapshot the accumulated state as an immutable record.
    ///
    /// The builder keeps its state; it is still meant for a single record.
    pub fn build(&self) -> ContactRecord {
        ContactRecord::from_parts(
            self.name.iter().cloned().collect(),
            self.phone_numbers.clone(),
            self.addresses.clone(),
            self.websites.clone(),
            self.photo.clone(),
            self.is_business,
            self.info_url.clone(),
            self.source,
        )
    }
}

impl Default for ContactRecordBuilder {
    fn default() -> Self {
        Self::new(ContactSource::ReverseLookup)
    }
}
