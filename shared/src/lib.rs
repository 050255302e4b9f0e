use serde::{Deserialize, Deserializer, Serialize};

pub mod protocol;

// =========================================================
// Constants
// =========================================================

pub const PATH_LOGIN: &str = "/login";
pub const PATH_REGISTER: &str = "/register";
pub const PATH_PRODUCTS: &str = "/api/products";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// Domain models
// =========================================================

/// A product record as the backend returns it.
///
/// The backend is the source of truth for every field; `id` is assigned by
/// the server on create. `nombre` is optional on the wire because older
/// records may lack it, and such records must not break a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub precio: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, nombre: impl Into<String>, precio: f64) -> Self {
        Self {
            id: id.into(),
            nombre: Some(nombre.into()),
            precio,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.nombre.as_deref()
    }

    /// Whether this record is addressed by `key`.
    pub fn matches(&self, key: &ProductKey) -> bool {
        match key {
            ProductKey::Id(id) => &self.id == id,
            ProductKey::Name(name) => self.name() == Some(name.as_str()),
        }
    }
}

/// Body of a create call. `precio` is already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub nombre: String,
    pub precio: f64,
}

/// How a mutating call addresses an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Id(String),
    Name(String),
}

impl ProductKey {
    pub fn as_str(&self) -> &str {
        match self {
            ProductKey::Id(v) | ProductKey::Name(v) => v,
        }
    }
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductKey::Id(id) => write!(f, "id:{}", id),
            ProductKey::Name(name) => write!(f, "name:{}", name),
        }
    }
}

// Prices coming back from the edit form may have been stored as raw text,
// possibly empty. Text that is not a number reads as 0 so one bad record
// cannot fail a whole listing.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => Ok(s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0)),
        Raw::Null => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_accepts_plain_id_and_mongo_id() {
        let a: Product = serde_json::from_str(r#"{"id":"p1","nombre":"Widget","precio":9.99}"#).unwrap();
        let b: Product = serde_json::from_str(r#"{"_id":"p1","nombre":"Widget","precio":9.99}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), Some("Widget"));
    }

    #[test]
    fn product_tolerates_missing_name_and_text_price() {
        let p: Product = serde_json::from_str(r#"{"_id":"p2","precio":"12.5"}"#).unwrap();
        assert_eq!(p.nombre, None);
        assert_eq!(p.precio, 12.5);
    }

    #[test]
    fn unparsable_text_price_reads_as_zero() {
        let p: Product = serde_json::from_str(r#"{"_id":"p2","nombre":"Gadget","precio":""}"#).unwrap();
        assert_eq!(p.precio, 0.0);
        let p: Product = serde_json::from_str(r#"{"_id":"p3","precio":"doce"}"#).unwrap();
        assert_eq!(p.precio, 0.0);
        let p: Product = serde_json::from_str(r#"{"_id":"p4","precio":null}"#).unwrap();
        assert_eq!(p.precio, 0.0);
    }

    #[test]
    fn product_serializes_with_backend_id_field() {
        let json = serde_json::to_value(Product::new("p1", "Widget", 1.0)).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["nombre"], "Widget");
    }

    #[test]
    fn key_matching() {
        let p = Product::new("p1", "Widget", 1.0);
        assert!(p.matches(&ProductKey::Id("p1".into())));
        assert!(p.matches(&ProductKey::Name("Widget".into())));
        assert!(!p.matches(&ProductKey::Name("widget".into())));
    }
}
