use super::required;
use crate::domain::error::RecordResult;
use crate::storage::{EntityId, StoredEntity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Incoming business attributes, as sent on create and full replace.
#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
pub struct BusinessPayload {
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl BusinessPayload {
    /// All six attributes are required on create and on replace.
    pub fn validate(self) -> RecordResult<BusinessFields> {
        Ok(BusinessFields {
            owner_id: required(self.owner_id)?,
            name: required(self.name)?,
            street_address: required(self.street_address)?,
            city: required(self.city)?,
            state: required(self.state)?,
            zip_code: required(self.zip_code)?,
        })
    }
}

/// Stored business attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BusinessFields {
    pub owner_id: i64,
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Business {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Business {
    pub fn new(id: EntityId, fields: BusinessFields) -> Self {
        Self {
            id,
            owner_id: fields.owner_id,
            name: fields.name,
            street_address: fields.street_address,
            city: fields.city,
            state: fields.state,
            zip_code: fields.zip_code,
        }
    }

    pub fn from_stored(entity: StoredEntity) -> RecordResult<Self> {
        let fields: BusinessFields = super::from_properties(entity.properties)?;
        Ok(Self::new(entity.id, fields))
    }
}
