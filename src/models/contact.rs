//! Contact record produced by a successful reverse lookup.

use serde::{Deserialize, Serialize};

/// A display name, optionally split into its parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Name {
    /// Name as it should be shown to the user
    pub display_name: String,

    /// Given (first) name, when the source distinguishes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Family (last) name, when the source distinguishes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

impl Name {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }
}

/// Kind of a phone number entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    #[default]
    Main,
    Mobile,
    Home,
    Work,
    Other,
}

/// A phone number entry of a contact record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPhone {
    /// The number as reported by the provider
    pub number: String,

    /// What kind of line this is
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
}

impl ContactPhone {
    pub fn new(number: impl Into<String>, phone_type: PhoneType) -> Self {
        Self {
            number: number.into(),
            phone_type,
        }
    }
}

/// Kind of a postal address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

/// A postal address of a contact record.
///
/// `formatted_address` is always present; the component fields are only filled
/// by providers whose source splits the address up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Address {
    pub formatted_address: String,

    #[serde(rename = "type")]
    pub address_type: AddressType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    pub fn new(formatted_address: impl Into<String>, address_type: AddressType) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            address_type,
            ..Default::default()
        }
    }
}

/// Kind of a website entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteType {
    #[default]
    Profile,
    Homepage,
    Other,
}

/// A website entry of a contact record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Website {
    pub url: String,

    #[serde(rename = "type")]
    pub website_type: WebsiteType,
}

impl Website {
    pub fn new(url: impl Into<String>, website_type: WebsiteType) -> Self {
        Self {
            url: url.into(),
            website_type,
        }
    }
}

/// Photo to show for the contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PhotoReference {
    #[default]
    None,
    /// Generic business placeholder image
    BusinessPlaceholder,
    /// Image at the given URI
    Uri(String),
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactSource {
    #[default]
    ReverseLookup,
    ForwardLookup,
    Directory,
}

/// A provider-agnostic bundle of identity fields.
///
/// Records are assembled by [`ContactRecordBuilder`](super::ContactRecordBuilder) and
/// are read-only afterwards: fields are exposed through accessors only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRecord {
    names: Vec<Name>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    phone_numbers: Vec<ContactPhone>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    addresses: Vec<Address>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    websites: Vec<Website>,

    #[serde(default)]
    photo: PhotoReference,

    #[serde(default)]
    is_business: bool,

    /// Page the data was taken from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    info_url: Option<String>,

    source: ContactSource,
}

impl ContactRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        names: Vec<Name>,
        phone_numbers: Vec<ContactPhone>,
        addresses: Vec<Address>,
        websites: Vec<Website>,
        photo: PhotoReference,
        is_business: bool,
        info_url: Option<String>,
        source: ContactSource,
    ) -> Self {
        Self {
            names,
            phone_numbers,
            addresses,
            websites,
            photo,
            is_business,
            info_url,
            source,
        }
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn phone_numbers(&self) -> &[ContactPhone] {
        &self.phone_numbers
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn websites(&self) -> &[Website] {
        &self.websites
    }

    pub fn photo(&self) -> &PhotoReference {
        &self.photo
    }

    pub fn is_business(&self) -> bool {
        self.is_business
    }

    pub fn info_url(&self) -> Option<&str> {
        self.info_url.as_deref()
    }

    pub fn source(&self) -> ContactSource {
        self.source
    }

    /// A record with neither a name nor a phone number carries no result.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.phone_numbers.is_empty()
    }

    /// Display name of the first name entry.
    pub fn display_name(&self) -> Option<&str> {
        self.names.first().map(|n| n.display_name.as_str())
    }

    /// First phone number of the record.
    pub fn primary_number(&self) -> Option<&str> {
        self.phone_numbers.first().map(|p| p.number.as_str())
    }

    /// Encode the record as JSON for storage by the caller.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a record previously produced by [`ContactRecord::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
