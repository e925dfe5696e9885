use serde::Deserialize;

/// Response shape shared by the `queries` and `getQueryResults` endpoints.
/// Only the fields the pipeline reads are modelled.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub job_complete: bool,
    pub job_reference: Option<JobReference>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    pub page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub job_id: String,
}

/// A result row in BigQuery's `f`/`v` encoding: one cell per selected column,
/// values serialized as JSON strings (or null).
#[derive(Deserialize, Debug)]
pub struct TableRow {
    pub f: Vec<TableCell>,
}

#[derive(Deserialize, Debug)]
pub struct TableCell {
    pub v: Option<serde_json::Value>,
}
