use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::StoreError;

pub type Row = Map<String, Value>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal table-store contract the adapter needs from the hosted backend.
///
/// Rows use the backend's own (snake_case) column names; translation happens
/// in the adapter.
pub trait TableClient: Send + Sync {
    /// Rows whose columns equal every `(column, value)` filter.
    fn select(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<Row>, StoreError>;
    /// Inserts `row` and returns it as stored, server-assigned id included.
    fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError>;
    /// Applies `row` to the record with `id` and returns the updated record.
    fn update(&self, table: &str, id: &str, row: &Row) -> Result<Row, StoreError>;
    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError>;
    /// Cheap query proving the table is reachable.
    fn ping(&self, table: &str) -> Result<(), StoreError>;
}

/// [`TableClient`] speaking the PostgREST dialect used by hosted Postgres
/// backends (`{project_url}/rest/v1/{table}`).
pub struct RestTableClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl RestTableClient {
    pub fn new(project_url: &str, api_key: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            base_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            agent,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn request(&self, method: &str, table: &str) -> ureq::Request {
        self.agent
            .request(method, &self.table_url(table))
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
    }

    fn single_row(table: &str, rows: Vec<Row>) -> Result<Row, StoreError> {
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::MissingRow(table.to_string()))
    }
}

impl TableClient for RestTableClient {
    fn select(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<Row>, StoreError> {
        let mut request = self.request("GET", table).query("select", "*");
        for (column, value) in filters {
            request = request.query(column, &format!("eq.{value}"));
        }
        let response = request.call().map_err(map_ureq_error)?;
        Ok(response.into_json()?)
    }

    fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError> {
        let response = self
            .request("POST", table)
            .set("Prefer", "return=representation")
            .send_json(Value::Object(row.clone()))
            .map_err(map_ureq_error)?;
        Self::single_row(table, response.into_json()?)
    }

    fn update(&self, table: &str, id: &str, row: &Row) -> Result<Row, StoreError> {
        let response = self
            .request("PATCH", table)
            .query("id", &format!("eq.{id}"))
            .set("Prefer", "return=representation")
            .send_json(Value::Object(row.clone()))
            .map_err(map_ureq_error)?;
        Self::single_row(table, response.into_json()?)
    }

    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        self.request("DELETE", table)
            .query("id", &format!("eq.{id}"))
            .call()
            .map_err(map_ureq_error)?;
        Ok(())
    }

    fn ping(&self, table: &str) -> Result<(), StoreError> {
        self.request("GET", table)
            .query("select", "id")
            .query("limit", "1")
            .call()
            .map_err(map_ureq_error)?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

fn map_ureq_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            decode_error_body(status, &body)
        }
        ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
    }
}

fn decode_error_body(status: u16, body: &str) -> StoreError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    StoreError::Remote {
        status,
        code: parsed.code,
        message,
    }
}
