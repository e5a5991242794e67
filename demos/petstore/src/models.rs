use chrono::{DateTime, Utc};
use garde::Validate;
use routedoc::Describe;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Describe)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Adopted,
}

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Uuid,
    /// Display name of the pet.
    #[describe(example = "Rex")]
    pub name: String,
    pub status: PetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub owner: Option<Owner>,
    /// Adoption fee.
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub internal_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Describe)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    #[garde(length(min = 1, max = 64))]
    #[describe(example = "Rex")]
    pub name: String,
    #[garde(skip)]
    pub status: PetStatus,
    /// Free-form category such as `dog` or `cat`.
    #[garde(required, length(min = 1, max = 32))]
    pub category: Option<String>,
    #[garde(range(max = 100))]
    pub age_years: u8,
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[garde(skip)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub contact: Contact,
}

/// Only ever used inside [`Owner`].
#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
#[describe(inline)]
pub struct Contact {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Opaque cursor for the next page; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// RFC 7807 problem details.
#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
pub struct Health {
    pub status: String,
    pub uptime_seconds: u64,
}
