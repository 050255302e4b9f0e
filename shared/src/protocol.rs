use crate::{NewProduct, PATH_LOGIN, PATH_PRODUCTS, PATH_REGISTER, Product, ProductKey};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the API origin.
    fn path(&self) -> Cow<'static, str>;
    /// Whether a successful response body is parsed. When false, any 2xx
    /// body (empty, plain text, JSON) is accepted and `Response` is decoded
    /// from `null`.
    const READS_BODY: bool = true;
}

// =========================================================
// Response Definitions
// =========================================================

/// Successful login. Only `token` is required; anything else is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain `{ message }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Create and update both echo the canonical record under `producto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub producto: Product,
}

/// Error body shape. The backend uses `message`; some proxies use `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// A response whose body is not inspected (e.g. delete).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Ack)
    }
}

// =========================================================
// Request Definitions
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_LOGIN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_REGISTER)
    }
}

/// List all products
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListProducts;

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_PRODUCTS)
    }
}

/// Create a product
impl ApiRequest for NewProduct {
    type Response = ProductEnvelope;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(PATH_PRODUCTS)
    }
}

/// Replace a product; the full record is the body, addressed by its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UpdateProduct(pub Product);

impl ApiRequest for UpdateProduct {
    type Response = ProductEnvelope;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(item_path(&self.0.id))
    }
}

/// Delete a product by name or id. Carries no body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteProduct {
    #[serde(skip)]
    pub key: ProductKey,
}

impl ApiRequest for DeleteProduct {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const READS_BODY: bool = false;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(item_path(self.key.as_str()))
    }
}

fn item_path(segment: &str) -> String {
    format!("{}/{}", PATH_PRODUCTS, urlencoding::encode(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_are_percent_encoded() {
        let req = DeleteProduct {
            key: ProductKey::Name("Caja 10/20".into()),
        };
        assert_eq!(req.path(), "/api/products/Caja%2010%2F20");

        let req = UpdateProduct(Product::new("p1", "Widget", 1.0));
        assert_eq!(req.path(), "/api/products/p1");
    }

    #[test]
    fn ack_accepts_any_body() {
        assert_eq!(serde_json::from_str::<Ack>("null").unwrap(), Ack);
        assert_eq!(serde_json::from_str::<Ack>(r#"{"message":"ok"}"#).unwrap(), Ack);
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"bad","error":"worse"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("bad"));
        let body: ErrorBody = serde_json::from_str(r#"{"error":"worse"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("worse"));
        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(NewProduct::METHOD.has_body());
        assert!(UpdateProduct::METHOD.has_body());
        assert!(!ListProducts::METHOD.has_body());
        assert!(!DeleteProduct::METHOD.has_body());
    }
}
