use crate::models::{Product, ProductPayload, ProductType};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Input fields the form accepts, by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    IdType,
    CostPrice,
    Price,
    MinStock,
    Stock,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::IdType => "idType",
            FormField::CostPrice => "costPrice",
            FormField::Price => "price",
            FormField::MinStock => "minStock",
            FormField::Stock => "stock",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FormField::Name),
            "idType" => Ok(FormField::IdType),
            "costPrice" => Ok(FormField::CostPrice),
            "price" => Ok(FormField::Price),
            "minStock" => Ok(FormField::MinStock),
            "stock" => Ok(FormField::Stock),
            other => Err(format!("unknown form field: {other}")),
        }
    }
}

/// A partially filled product. Input values stay as the raw strings the
/// inputs produced until a payload is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub id_type: Option<String>,
    pub cost_price: Option<String>,
    pub price: Option<String>,
    pub min_stock: Option<String>,
    pub stock: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
    pub created_at: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
}

impl ProductForm {
    /// Copies a full row, used when a row enters edit mode.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: Some(product.name.clone()),
            id_type: Some(product.id_type.to_string()),
            cost_price: Some(product.cost_price.to_string()),
            price: Some(product.price.to_string()),
            min_stock: Some(product.min_stock.to_string()),
            stock: Some(product.stock.to_string()),
            is_active: Some(product.is_active),
            is_deleted: Some(product.is_deleted),
            created_at: Some(product.created_at.clone()),
            product_type: product.product_type.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges an input change. Names outside [`FormField`] never reach a payload and are dropped.
    pub fn handle_input_change(&mut self, field: &str, value: impl Into<String>) {
        match field.parse::<FormField>() {
            Ok(field) => *self.slot_mut(field) = Some(value.into()),
            Err(e) => tracing::debug!("ignoring input change: {e}"),
        }
    }

    pub fn display_value(&self, field: FormField) -> &str {
        self.slot(field).as_deref().unwrap_or("")
    }

    fn slot(&self, field: FormField) -> &Option<String> {
        match field {
            FormField::Name => &self.name,
            FormField::IdType => &self.id_type,
            FormField::CostPrice => &self.cost_price,
            FormField::Price => &self.price,
            FormField::MinStock => &self.min_stock,
            FormField::Stock => &self.stock,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Name => &mut self.name,
            FormField::IdType => &mut self.id_type,
            FormField::CostPrice => &mut self.cost_price,
            FormField::Price => &mut self.price,
            FormField::MinStock => &mut self.min_stock,
            FormField::Stock => &mut self.stock,
        }
    }

    /// Builds a write body, filling every unset field with its default.
    ///
    /// `type` falls back to [`ProductType::default`] whenever the form has none,
    /// whatever `idType` says.
    pub fn to_payload(&self, id: i64, now: &str) -> ProductPayload {
        ProductPayload {
            id,
            name: self.name.clone().unwrap_or_default(),
            id_type: self.coerce(FormField::IdType, 1),
            cost_price: self.coerce(FormField::CostPrice, 0.0),
            price: self.coerce(FormField::Price, 0.0),
            min_stock: self.coerce(FormField::MinStock, 0),
            stock: self.coerce(FormField::Stock, 0),
            created_at: self
                .created_at
                .clone()
                .filter(|created| !created.is_empty())
                .unwrap_or_else(|| now.to_string()),
            updated_at: now.to_string(),
            product_type: self.product_type.clone().unwrap_or_default(),
        }
    }

    fn coerce<T: FromStr>(&self, field: FormField, default: T) -> T {
        match self.slot(field).as_deref().map(str::trim) {
            None | Some("") => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(field = field.as_str(), value = raw, "not a number, using default");
                default
            }),
        }
    }
}

/// Current time in the `2024-01-31T12:00:00.000Z` shape the service stores.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp-derived ids for records the server has not numbered yet.
#[derive(Debug, Default)]
pub struct PlaceholderIds {
    last: AtomicI64,
}

impl PlaceholderIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the epoch, bumped past the previous id when the clock has not moved.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }
}
