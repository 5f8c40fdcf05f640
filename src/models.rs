use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
}

impl Default for ProductType {
    fn default() -> Self {
        Self {
            id: 1,
            name: "General".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub id_type: i64,
    pub cost_price: f64,
    pub price: f64,
    pub min_stock: i32,
    pub stock: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(rename = "type", default)]
    pub product_type: Option<ProductType>,
}

/// Body of a create or update request. The active/deleted flags are left to the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub id: i64,
    pub name: String,
    pub id_type: i64,
    pub cost_price: f64,
    pub price: f64,
    pub min_stock: i32,
    pub stock: i32,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Product {
            id: payload.id,
            name: payload.name,
            id_type: payload.id_type,
            cost_price: payload.cost_price,
            price: payload.price,
            min_stock: payload.min_stock,
            stock: payload.stock,
            is_active: false,
            is_deleted: false,
            created_at: payload.created_at,
            updated_at: payload.updated_at,
            product_type: Some(payload.product_type),
        }
    }
}
