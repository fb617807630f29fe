use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Address;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl CreateAddressRequest {
    /// Full field set as a partial update, for callers that feed new address
    /// fields into the copy-on-write path.
    pub fn into_update(self) -> UpdateAddressRequest {
        UpdateAddressRequest {
            street: Some(self.street),
            house_number: Some(self.house_number),
            postal_code: Some(self.postal_code),
            city: Some(self.city),
            country: Some(self.country),
        }
    }
}

/// Partial update; only supplied fields are written. When the address is
/// shared by more than one owner the service clones it instead (copy-on-write)
/// and the response carries the new id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressList {
    pub items: Vec<Address>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostalCodeQuery {
    pub postal_code: String,
}
