//! Record types shared by the CLI and the report builder.
//!
//! The wire format is the JSON produced by `GET /api/damaged-boxes`: snake_case
//! field names, loosely typed values. Deserialization is lenient so that one
//! malformed field never drops a record:
//! - text fields accept `null` and numbers
//! - `qty` accepts numbers and numeric strings, anything else becomes 0

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One damaged-carton inspection record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamagedBox {
    pub id: i64,

    /// Shipment reference (ASN). Missing values never match a search.
    #[serde(default, deserialize_with = "de::opt_text")]
    pub asn_no: Option<String>,

    #[serde(default, deserialize_with = "de::text")]
    pub ref_po_doc: String,

    #[serde(default, deserialize_with = "de::text")]
    pub carton_no: String,

    /// Order-fulfillment number
    #[serde(default, deserialize_with = "de::text")]
    pub of_no: String,

    #[serde(default, deserialize_with = "de::text")]
    pub issue_type: String,

    #[serde(default, deserialize_with = "de::text")]
    pub scan_carton: String,

    #[serde(default, deserialize_with = "de::text")]
    pub barcode: String,

    #[serde(default, deserialize_with = "de::text")]
    pub item_sku: String,

    #[serde(default, deserialize_with = "de::quantity")]
    pub qty: u64,

    /// Reporter name
    #[serde(default, deserialize_with = "de::text")]
    pub saved_by: String,

    #[serde(default, deserialize_with = "de::opt_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text", skip_serializing_if = "Option::is_none")]
    pub carton_image: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text", skip_serializing_if = "Option::is_none")]
    pub sku1_image: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text", skip_serializing_if = "Option::is_none")]
    pub sku2_image: Option<String>,
}

/// Photo slots attached to a record, in report column order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Carton,
    Sku1,
    Sku2,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::Carton, ImageSlot::Sku1, ImageSlot::Sku2];

    pub fn header(&self) -> &'static str {
        match self {
            ImageSlot::Carton => "Carton Image",
            ImageSlot::Sku1 => "SKU1 Image",
            ImageSlot::Sku2 => "SKU2 Image",
        }
    }
}

impl DamagedBox {
    /// Image locator for a slot. Blank locators count as absent.
    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        let locator = match slot {
            ImageSlot::Carton => self.carton_image.as_deref(),
            ImageSlot::Sku1 => self.sku1_image.as_deref(),
            ImageSlot::Sku2 => self.sku2_image.as_deref(),
        };
        locator.map(str::trim).filter(|s| !s.is_empty())
    }

    /// All present image locators in slot order
    pub fn images(&self) -> impl Iterator<Item = (ImageSlot, &str)> + '_ {
        ImageSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.image(slot).map(|url| (slot, url)))
    }
}

mod de {
    use super::*;

    fn value_to_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_text(value).unwrap_or_default())
    }

    pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_text(value))
    }

    pub fn quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_quantity(&value))
    }

    fn parse_quantity(value: &Value) -> u64 {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(n) if n.is_finite() && n > 0.0 => n.trunc() as u64,
            _ => 0,
        }
    }
}
