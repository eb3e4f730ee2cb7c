//! HTTP client for the Dilovod API.
//!
//! The [`Client`] type is the main entry point. Every public operation is a
//! thin wrapper around one private `request` method: build the envelope,
//! POST it, classify the response.

use crate::{
    envelope::{Envelope, ObjectsQuery},
    Error, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Production API endpoint.
const BASE_URL: &str = "https://api.dilovod.ua";

/// Per-request timeout applied unless overridden at construction.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for the Dilovod business-management API.
///
/// The client is immutable after construction and designed to be reused
/// across calls; it maintains a connection pool and carries the API key
/// into every request. Cloning is cheap and clones share the pool.
///
/// Each call is exactly one network round trip: there are no retries and
/// no caching, and no state is carried between calls.
///
/// # Examples
///
/// ```no_run
/// use dilovod::{Client, ObjectsQuery};
///
/// # async fn example() -> Result<(), dilovod::Error> {
/// let client = Client::new("YOUR_API_KEY")?;
///
/// // List up to ten goods, by name.
/// let goods = client
///     .get_objects(
///         ObjectsQuery::new("catalogs.goods")
///             .fields(["name", "price"])
///             .order_by("name ASC")
///             .limit(10),
///     )
///     .await?;
/// println!("Found {} goods", goods.len());
///
/// // Fetch one object by its identifier.
/// let good = client.get_object("1100100000001").await?;
/// println!("{good}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl Client {
    /// Creates a client for the production endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Client> {
        Client::builder().api_key(api_key).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dilovod::Client;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), dilovod::Error> {
    /// let client = Client::builder()
    ///     .api_key("YOUR_API_KEY")
    ///     .base_url("https://api.staging.dilovod.ua")?
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Fetches a single object (document, catalog entry, etc.) by its
    /// identifier.
    ///
    /// The object is returned exactly as the remote sent it; the client
    /// does not validate or interpret its shape.
    pub async fn get_object(&self, id: impl Into<String>) -> Result<Value> {
        self.request("getObject", json!({ "id": id.into() })).await
    }

    /// Lists objects matching the given query.
    ///
    /// Query criteria left at their defaults are omitted from the outgoing
    /// request entirely; see [`ObjectsQuery`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dilovod::{Client, ObjectsQuery};
    ///
    /// # async fn example() -> Result<(), dilovod::Error> {
    /// # let client = Client::new("YOUR_API_KEY")?;
    /// let buyers = client
    ///     .get_objects(ObjectsQuery::new("catalogs.persons").filter("is_buyer", true))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_objects(&self, query: ObjectsQuery) -> Result<Vec<Value>> {
        self.request("getObjects", query.into_params()).await
    }

    /// Creates or updates an object.
    ///
    /// `object_data` must carry a `type` discriminator; the client does not
    /// enforce this, the remote validates. Returns the remote's
    /// acknowledgment, typically containing the assigned `id`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dilovod::Client;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), dilovod::Error> {
    /// # let client = Client::new("YOUR_API_KEY")?;
    /// let result = client
    ///     .save_object(&json!({
    ///         "type": "catalogs.persons",
    ///         "name": "New Client",
    ///         "is_buyer": true,
    ///     }))
    ///     .await?;
    /// println!("Saved with id {:?}", result.get("id"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_object<T>(&self, object_data: &T) -> Result<Value>
    where
        T: Serialize,
    {
        let params = to_params(object_data)?;
        self.request("saveObject", params).await
    }

    /// Creates a sale order (order from buyer).
    ///
    /// Identical mechanics to [`save_object`](Client::save_object) under
    /// the fixed remote action name `saleOrderCreate`; the order payload is
    /// transmitted unaltered.
    pub async fn sale_order_create<T>(&self, order_data: &T) -> Result<Value>
    where
        T: Serialize,
    {
        let params = to_params(order_data)?;
        self.request("saleOrderCreate", params).await
    }

    /// The single choke point for every call.
    ///
    /// Wraps `params` in the `{action, params, key}` envelope, POSTs it to
    /// the base endpoint, and classifies the response into a result payload
    /// or an [`Error`].
    async fn request<T>(&self, action: &str, params: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let envelope = Envelope {
            action,
            params,
            key: &self.inner.api_key,
        };

        tracing::debug!(action, url = %self.inner.base_url, "Sending API request");

        let mut request = self
            .inner
            .http_client
            .post(self.inner.base_url.clone())
            .timeout(self.inner.timeout);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        let response = request.json(&envelope).send().await?;
        let response = response.error_for_status()?;

        let raw_body = response.text().await?;

        let data: Value = serde_json::from_str(&raw_body).map_err(|e| {
            tracing::error!(
                action,
                error = %e,
                raw_response = %raw_body,
                "Failed to decode API response"
            );
            Error::Decode {
                reason: e.to_string(),
                raw_response: raw_body.clone(),
            }
        })?;

        if let Some(error) = data.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown API error")
                .to_string();
            let code = error
                .get("code")
                .and_then(Value::as_str)
                .map(str::to_string);

            tracing::warn!(action, code = code.as_deref(), %message, "API reported an error");

            return Err(Error::Api { message, code });
        }

        let result = match data {
            Value::Object(mut body) => match body.remove("result") {
                Some(result) => result,
                None => {
                    return Err(Error::MissingResult {
                        raw_response: raw_body,
                    })
                }
            },
            // A well-formed body that is not an object cannot carry a
            // result field either.
            _ => {
                return Err(Error::MissingResult {
                    raw_response: raw_body,
                })
            }
        };

        tracing::debug!(action, "API request succeeded");

        serde_json::from_value(result).map_err(|e| Error::Decode {
            reason: e.to_string(),
            raw_response: raw_body,
        })
    }
}

fn to_params<T: Serialize>(data: &T) -> Result<Value> {
    serde_json::to_value(data).map_err(|e| Error::Serialize(e.to_string()))
}

/// Builder for configuring and creating a [`Client`].
///
/// Only the API key is required; the endpoint, timeout, and extra headers
/// have production defaults.
///
/// # Examples
///
/// ```no_run
/// use dilovod::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), dilovod::Error> {
/// let client = ClientBuilder::new()
///     .api_key("YOUR_API_KEY")
///     .timeout(Duration::from_secs(60))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the API key (token generated in the Dilovod system).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the API endpoint. Defaults to the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was provided or if the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Configuration("API key is required".to_string()))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(BASE_URL)?,
        };

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        let mut default_headers = self.default_headers;
        if !default_headers.contains_key(header::ACCEPT) {
            default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        }

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                api_key,
                default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
