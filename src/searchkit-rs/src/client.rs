use crate::transport::Transport;
use reqwest::{Method, Url};
use searchkit_core::response::normalize_hits;
use searchkit_core::{ConnectionConfig, Document, Error, RawResponse, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Mutex;

/// A search query, sent over exactly one of two transport shapes.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Free-text query, appended as the `q` URL parameter
    /// (e.g. `"+rust +client"` or `"title:how to"`).
    QueryString(String),
    /// Structured query DSL, sent as the JSON request body.
    Dsl(Value),
}

impl From<&str> for SearchQuery {
    fn from(q: &str) -> Self {
        SearchQuery::QueryString(q.to_string())
    }
}

impl From<String> for SearchQuery {
    fn from(q: String) -> Self {
        SearchQuery::QueryString(q)
    }
}

impl From<Value> for SearchQuery {
    fn from(q: Value) -> Self {
        SearchQuery::Dsl(q)
    }
}

/// Client for one configured connection to the search engine.
///
/// Owns the base URL and timeout derived once from its
/// [`ConnectionConfig`]; obtained from a
/// [`ConnectionRegistry`](crate::ConnectionRegistry) or constructed
/// directly. The raw outcome of the most recent operation is retained for
/// diagnostics, see [`Client::last_response`].
#[derive(Debug)]
pub struct Client {
    base_url: String,
    transport: Transport,
    last_response: Mutex<Option<RawResponse>>,
}

#[derive(Serialize)]
struct DeleteByQueryRequest<'a> {
    query: TermsQuery<'a>,
}

#[derive(Serialize)]
struct TermsQuery<'a> {
    terms: TermsIds<'a>,
}

#[derive(Serialize)]
struct TermsIds<'a> {
    #[serde(rename = "_id")]
    ids: &'a [&'a str],
}

#[derive(Serialize)]
struct CountRequest {
    query: TermQuery,
}

#[derive(Serialize)]
struct TermQuery {
    term: Value,
}

impl Client {
    /// Create a client from a resolved configuration.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url(),
            transport: Transport::new(config.timeout_ms)?,
            last_response: Mutex::new(None),
        })
    }

    /// The raw status code and decoded body of the most recent operation
    /// on this client, if any completed a round trip.
    pub fn last_response(&self) -> Option<RawResponse> {
        self.last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Lists the index names known to the engine, in engine order.
    pub async fn indexes(&self) -> Result<Vec<String>> {
        let url = self.url("/_all")?;
        let response = self.dispatch_empty(Method::GET, url).await?;
        self.check_engine(&response)?;

        let body = response
            .body
            .as_ref()
            .and_then(Value::as_object)
            .ok_or(Error::InvalidResponse)?;
        Ok(body.keys().cloned().collect())
    }

    /// Creates an index, optionally with settings.
    ///
    /// Returns whether the engine acknowledged the creation.
    pub async fn add_index(&self, name: &str, settings: Option<Value>) -> Result<bool> {
        let url = self.url(&format!("/{}", name))?;
        let response = self.dispatch(Method::PUT, url, settings.as_ref()).await?;
        self.check_engine(&response)?;
        Ok(response.acknowledged())
    }

    /// Deletes an index.
    ///
    /// Returns whether the engine acknowledged the deletion.
    pub async fn remove_index(&self, name: &str) -> Result<bool> {
        let url = self.url(&format!("/{}", name))?;
        let response = self.dispatch_empty(Method::DELETE, url).await?;
        self.check_engine(&response)?;
        Ok(response.acknowledged())
    }

    /// Checks whether an index exists.
    ///
    /// An existence check is a query, not an assertion: a 404 answers
    /// `false` rather than raising, and the body is never inspected
    /// (HEAD responses carry none).
    pub async fn index_exists(&self, name: &str) -> Result<bool> {
        let url = self.url(&format!("/{}", name))?;
        let response = self.dispatch_empty(Method::HEAD, url).await?;
        Ok(response.status_code == 200)
    }

    /// Gets the engine's information about an index, or `None` when the
    /// response does not carry an entry for it.
    pub async fn get_index(&self, name: &str) -> Result<Option<Value>> {
        let url = self.url(&format!("/{}", name))?;
        let response = self.dispatch_empty(Method::GET, url).await?;
        self.check_engine(&response)?;
        Ok(response.body.as_ref().and_then(|b| b.get(name)).cloned())
    }

    /// Indexes a document under `id`.
    ///
    /// Returns whether the engine answered with a non-empty body.
    pub async fn index(&self, index: &str, id: &str, data: &Value) -> Result<bool> {
        let url = self.url(&format!("/{}/_doc/{}", index, id))?;
        let response = self.dispatch(Method::PUT, url, Some(data)).await?;
        self.check_engine(&response)?;
        Ok(response.has_content())
    }

    /// Fetches a document's stored fields.
    ///
    /// Raises [`Error::NotFound`] when the round trip succeeds but `found`
    /// is false or absent; the fields are returned raw, with no `id` merge.
    pub async fn get(&self, index: &str, id: &str) -> Result<Document> {
        let url = self.url(&format!("/{}/_doc/{}", index, id))?;
        let response = self.dispatch_empty(Method::GET, url).await?;
        self.check_engine(&response)?;

        let found = response
            .body
            .as_ref()
            .and_then(|b| b.get("found"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !found {
            return Err(Error::NotFound {
                index: index.to_string(),
                id: id.to_string(),
            });
        }

        Ok(response
            .body
            .as_ref()
            .and_then(|b| b.get("_source"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default())
    }

    /// Checks whether a document exists. Never raises on non-200 statuses.
    pub async fn exists(&self, index: &str, id: &str) -> Result<bool> {
        let url = self.url(&format!("/{}/_doc/{}", index, id))?;
        let response = self.dispatch_empty(Method::HEAD, url).await?;
        Ok(response.status_code == 200)
    }

    /// Removes a single document from the index.
    ///
    /// Returns whether the engine reported the document as deleted.
    /// To remove several documents at once see [`Client::deindex_many`].
    pub async fn deindex(&self, index: &str, id: &str) -> Result<bool> {
        let url = self.url(&format!("/{}/_doc/{}", index, id))?;
        let response = self.dispatch_empty(Method::DELETE, url).await?;
        self.check_engine(&response)?;

        let deleted = response
            .body
            .as_ref()
            .and_then(|b| b.get("result"))
            .and_then(Value::as_str)
            == Some("deleted");
        Ok(deleted)
    }

    /// Removes several documents via the delete-by-query endpoint.
    ///
    /// Best effort: the endpoint reports no per-id outcome synchronously,
    /// so this returns `true` whenever the request round-trips without an
    /// engine error. Weaker than the single-id check, intentionally so.
    pub async fn deindex_many(&self, index: &str, ids: &[&str]) -> Result<bool> {
        let url = self.url(&format!("/{}/_delete_by_query", index))?;
        let request = DeleteByQueryRequest {
            query: TermsQuery {
                terms: TermsIds { ids },
            },
        };
        let response = self.dispatch(Method::POST, url, Some(&request)).await?;
        self.check_engine(&response)?;
        Ok(true)
    }

    /// Searches one or more indexes, in caller order.
    ///
    /// The query is either a free-text string (sent as the `q` URL
    /// parameter) or a structured DSL value (sent as the request body);
    /// exactly one shape is used per call. Results come back as normalized
    /// [`Document`] records in engine order.
    pub async fn search(
        &self,
        indexes: &[&str],
        query: impl Into<SearchQuery>,
    ) -> Result<Vec<Document>> {
        let path = format!("/{}/_search", indexes.join(","));
        let (url, body) = match query.into() {
            SearchQuery::QueryString(q) => {
                let url = self.url_with_params(&path, &[("q", q.as_str())])?;
                (url, None)
            }
            SearchQuery::Dsl(value) => (self.url(&path)?, Some(value)),
        };

        let response = self.dispatch(Method::GET, url, body.as_ref()).await?;
        self.check_engine(&response)?;

        Ok(match &response.body {
            Some(body) => normalize_hits(body),
            None => Vec::new(),
        })
    }

    /// Counts documents in an index, optionally narrowed by a term query
    /// such as `{"title": "how to"}`.
    pub async fn count(&self, index: &str, query: Option<Value>) -> Result<i64> {
        let url = self.url(&format!("/{}/_count", index))?;
        let body = query.map(|q| CountRequest {
            query: TermQuery { term: q },
        });
        let response = self.dispatch(Method::GET, url, body.as_ref()).await?;
        self.check_engine(&response)?;

        response
            .body
            .as_ref()
            .and_then(|b| b.get("count"))
            .and_then(Value::as_i64)
            .ok_or(Error::InvalidResponse)
    }

    async fn dispatch<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self.transport.send(method, url, body).await?;
        let mut slot = self
            .last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(response.clone());
        Ok(response)
    }

    async fn dispatch_empty(&self, method: Method, url: Url) -> Result<RawResponse> {
        self.dispatch::<Value>(method, url, None).await
    }

    fn check_engine(&self, response: &RawResponse) -> Result<()> {
        if let Some(reason) = response.engine_error() {
            return Err(Error::Engine(reason));
        }
        Ok(())
    }

    fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| Error::Transport {
            status: 500,
            message: e.to_string(),
        })
    }

    fn url_with_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(&format!("{}{}", self.base_url, path), params).map_err(|e| {
            Error::Transport {
                status: 500,
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delete_by_query_request_shape() {
        let request = DeleteByQueryRequest {
            query: TermsQuery {
                terms: TermsIds { ids: &["1", "2"] },
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": {"terms": {"_id": ["1", "2"]}}})
        );
    }

    #[test]
    fn test_count_request_shape() {
        let request = CountRequest {
            query: TermQuery {
                term: json!({"title": "how to"}),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": {"term": {"title": "how to"}}})
        );
    }

    #[test]
    fn test_search_query_from_str() {
        let query: SearchQuery = "title:rust".into();
        assert!(matches!(query, SearchQuery::QueryString(q) if q == "title:rust"));
    }

    #[test]
    fn test_search_query_from_value() {
        let query: SearchQuery = json!({"query": {"match_all": {}}}).into();
        assert!(matches!(query, SearchQuery::Dsl(_)));
    }

    #[test]
    fn test_new_client_has_no_last_response() {
        let client = Client::new(ConnectionConfig::default()).unwrap();
        assert!(client.last_response().is_none());
    }
}
