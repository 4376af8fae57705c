//! Location entity

use serde::{Deserialize, Serialize};

use super::types::{Entity, EntityMeta, EntityType, SupportsNilNormalization};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sublocality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
}

/// A physical business location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntity {
    #[serde(default)]
    pub meta: EntityMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<Website>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Read absent fields back as empty values; never sent over the wire
    #[serde(skip)]
    nil_is_empty: bool,
}

/// Resolve an optional field, substituting the empty value when nil-is-empty is set
fn read_optional<'a, T: ?Sized>(
    field: Option<&'a T>,
    empty: &'a T,
    nil_is_empty: bool,
) -> Option<&'a T> {
    match field {
        Some(v) => Some(v),
        None if nil_is_empty => Some(empty),
        None => None,
    }
}

static EMPTY_ADDRESS: Address = Address {
    line1: None,
    line2: None,
    city: None,
    region: None,
    sublocality: None,
    postal_code: None,
    country_code: None,
};

static EMPTY_WEBSITE: Website = Website {
    url: None,
    display_url: None,
};

const NO_STRINGS: &[String] = &[];

impl LocationEntity {
    pub fn name(&self) -> Option<&str> {
        read_optional(self.name.as_deref(), "", self.nil_is_empty)
    }

    pub fn main_phone(&self) -> Option<&str> {
        read_optional(self.main_phone.as_deref(), "", self.nil_is_empty)
    }

    pub fn description(&self) -> Option<&str> {
        read_optional(self.description.as_deref(), "", self.nil_is_empty)
    }

    pub fn address(&self) -> Option<&Address> {
        read_optional(self.address.as_ref(), &EMPTY_ADDRESS, self.nil_is_empty)
    }

    pub fn website_url(&self) -> Option<&Website> {
        read_optional(self.website_url.as_ref(), &EMPTY_WEBSITE, self.nil_is_empty)
    }

    pub fn category_ids(&self) -> Option<&[String]> {
        read_optional(self.category_ids.as_deref(), NO_STRINGS, self.nil_is_empty)
    }

    pub fn keywords(&self) -> Option<&[String]> {
        read_optional(self.keywords.as_deref(), NO_STRINGS, self.nil_is_empty)
    }

    pub fn closed(&self) -> Option<bool> {
        match self.closed {
            Some(v) => Some(v),
            None if self.nil_is_empty => Some(false),
            None => None,
        }
    }
}

impl Entity for LocationEntity {
    fn entity_type(&self) -> EntityType {
        EntityType::location()
    }

    fn entity_id(&self) -> String {
        self.meta.id.clone().unwrap_or_default()
    }

    fn nil_normalization(&mut self) -> Option<&mut dyn SupportsNilNormalization> {
        Some(self)
    }
}

impl SupportsNilNormalization for LocationEntity {
    fn set_nil_is_empty(&mut self, nil_is_empty: bool) {
        self.nil_is_empty = nil_is_empty;
    }

    fn nil_is_empty(&self) -> bool {
        self.nil_is_empty
    }
}
