use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use fractic_server_error::{CriticalError, ServerError};
use serde_json::Value;

use crate::{
    data::models::postgrest_error_model::PostgrestErrorModel,
    errors::{InvalidRemoteResponse, RemoteRequestFailed},
};

/// PostgREST query parameters, e.g. `("id", "eq.5")` or `("order", "id.asc")`.
pub(crate) type Query = Vec<(String, String)>;

pub(crate) fn eq(column: &str, value: impl ToString) -> (String, String) {
    (column.to_string(), format!("eq.{}", value.to_string()))
}

pub(crate) fn is_null(column: &str) -> (String, String) {
    (column.to_string(), "is.null".to_string())
}

pub(crate) fn not_null(column: &str) -> (String, String) {
    (column.to_string(), "not.is.null".to_string())
}

pub(crate) fn order(column: &str, ascending: bool) -> (String, String) {
    let dir = if ascending { "asc" } else { "desc" };
    ("order".to_string(), format!("{column}.{dir}"))
}

/// Supabase project coordinates plus the signed-in user's token. Cloned
/// handles share the token.
#[derive(Debug, Clone)]
pub(crate) struct RemoteSession {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl RemoteSession {
    pub(crate) fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CriticalError::with_debug("failed to build HTTP client", &e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    pub(crate) fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    /// Adds `apikey` and `Authorization`. Without a user token the anon key
    /// is the bearer, as Supabase expects.
    pub(crate) fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .ok()
            .and_then(|t| t.clone())
            .unwrap_or_else(|| self.api_key.clone());
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    /// Turns a non-2xx response into a user-facing rejection.
    pub(crate) async fn check(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ServerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error: PostgrestErrorModel = serde_json::from_str(&body).unwrap_or_default();
        Err(error.into_server_error(status.as_u16()))
    }
}

#[async_trait]
pub(crate) trait PostgrestDatasource: Send + Sync {
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, ServerError>;

    async fn insert(&self, table: &str, body: &Value) -> Result<Vec<Value>, ServerError>;

    /// Returns the updated rows; empty when nothing matched (or RLS hid it).
    async fn update(
        &self,
        table: &str,
        filter: Query,
        body: &Value,
    ) -> Result<Vec<Value>, ServerError>;

    async fn delete(&self, table: &str, filter: Query) -> Result<Vec<Value>, ServerError>;

    /// Exact number of rows matching `filter`, without fetching them.
    async fn count(&self, table: &str, filter: Query) -> Result<usize, ServerError>;
}

pub(crate) struct PostgrestDatasourceImpl {
    session: RemoteSession,
}

impl PostgrestDatasourceImpl {
    pub(crate) fn new(session: RemoteSession) -> Self {
        Self { session }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.session.base_url, table)
    }

    async fn send(
        &self,
        table: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<Value>, ServerError> {
        let url = self.table_url(table);
        let response = self
            .session
            .authorize(builder)
            .send()
            .await
            .map_err(|e| RemoteRequestFailed::with_debug(&url, &e))?;
        let response = RemoteSession::check(response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| RemoteRequestFailed::with_debug(&url, &e))?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&text)
            .map_err(|e| InvalidRemoteResponse::with_debug(table, "JSON body", &e))?
        {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }
}

#[async_trait]
impl PostgrestDatasource for PostgrestDatasourceImpl {
    async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, ServerError> {
        let mut query = query;
        if !query.iter().any(|(k, _)| k == "select") {
            query.push(("select".to_string(), "*".to_string()));
        }
        let builder = self.session.client.get(self.table_url(table)).query(&query);
        self.send(table, builder).await
    }

    async fn insert(&self, table: &str, body: &Value) -> Result<Vec<Value>, ServerError> {
        let builder = self
            .session
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body);
        self.send(table, builder).await
    }

    async fn update(
        &self,
        table: &str,
        filter: Query,
        body: &Value,
    ) -> Result<Vec<Value>, ServerError> {
        let builder = self
            .session
            .client
            .patch(self.table_url(table))
            .query(&filter)
            .header("Prefer", "return=representation")
            .json(body);
        self.send(table, builder).await
    }

    async fn delete(&self, table: &str, filter: Query) -> Result<Vec<Value>, ServerError> {
        let builder = self
            .session
            .client
            .delete(self.table_url(table))
            .query(&filter)
            .header("Prefer", "return=representation");
        self.send(table, builder).await
    }

    async fn count(&self, table: &str, filter: Query) -> Result<usize, ServerError> {
        let url = self.table_url(table);
        let builder = self
            .session
            .client
            .head(&url)
            .query(&filter)
            .header("Prefer", "count=exact");
        let response = self
            .session
            .authorize(builder)
            .send()
            .await
            .map_err(|e| RemoteRequestFailed::with_debug(&url, &e))?;
        let response = RemoteSession::check(response).await?;
        // `Content-Range: 0-24/311`, or `*/0` when nothing matched.
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|total| total.trim().parse::<usize>().ok())
            .ok_or_else(|| InvalidRemoteResponse::new(table, "Content-Range total"))
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;

    use super::*;

    /// One datasource call: verb, table, query/filter and body.
    pub(crate) type Call = (String, String, Query, Option<Value>);

    /// Records calls and replays canned rows.
    #[derive(Default)]
    pub(crate) struct RecordingDatasource {
        pub(crate) calls: Mutex<Vec<Call>>,
        pub(crate) rows: Vec<Value>,
    }

    impl RecordingDatasource {
        pub(crate) fn returning(rows: Vec<Value>) -> Self {
            Self {
                rows,
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, verb: &str, table: &str, query: Query, body: Option<&Value>) -> Vec<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((verb.into(), table.into(), query, body.cloned()));
            self.rows.clone()
        }
    }

    #[async_trait]
    impl PostgrestDatasource for RecordingDatasource {
        async fn select(&self, table: &str, query: Query) -> Result<Vec<Value>, ServerError> {
            Ok(self.record("select", table, query, None))
        }
        async fn insert(&self, table: &str, body: &Value) -> Result<Vec<Value>, ServerError> {
            Ok(self.record("insert", table, Vec::new(), Some(body)))
        }
        async fn update(
            &self,
            table: &str,
            filter: Query,
            body: &Value,
        ) -> Result<Vec<Value>, ServerError> {
            Ok(self.record("update", table, filter, Some(body)))
        }
        async fn delete(&self, table: &str, filter: Query) -> Result<Vec<Value>, ServerError> {
            Ok(self.record("delete", table, filter, None))
        }
        async fn count(&self, table: &str, filter: Query) -> Result<usize, ServerError> {
            Ok(self.record("count", table, filter, None).len())
        }
    }
}
