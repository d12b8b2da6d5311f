use crate::entities::customer_entity as customers;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer data pushed by the upstream membership system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterCustomerRequest {
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub status: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default)]
    pub push_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub last_name: String,
    pub status: String,
    pub phone_number: String,
    pub email: String,
}

impl From<customers::Model> for CustomerResponse {
    fn from(m: customers::Model) -> Self {
        Self {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            last_name: m.last_name,
            status: m.status,
            phone_number: m.phone_number,
            email: m.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterCustomerResponse {
    pub customer: CustomerResponse,
    pub created: bool,
}
