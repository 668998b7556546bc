//! Transports only return status and JSON body; `read_upload` and
//! `read_expense_list` decide what a reply means.

use gloo_net::http::{Request, Response};
use serde_json::Value;
use web_sys::FormData;

use crate::config::ViewConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::Expense;

#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn error_message(&self) -> Option<String> {
        match self.body.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(msg)) => Some(msg.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExpenseApi {
    /// Whatever the transport needs to carry the receipt file.
    type Upload;

    async fn submit_receipt(&self, upload: Self::Upload) -> ApiResult<Reply>;

    async fn list_expenses(&self) -> ApiResult<Reply>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadAccepted {
    pub message: Option<String>,
    pub data: Option<Expense>,
}

/// Only `error` and the status decide the outcome. `message` and `data` are
/// read best-effort; the receipt is already stored once we get here.
pub fn read_upload(reply: Reply) -> ApiResult<UploadAccepted> {
    if let Some(msg) = reply.error_message() {
        return Err(ApiError::Application(msg));
    }
    if !reply.ok() {
        return Err(ApiError::Status(reply.status));
    }
    let message = reply
        .body
        .get("message")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let data = match reply.body.get("data") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<Expense>(raw.clone()) {
            Ok(expense) => Some(expense),
            Err(err) => {
                log::warn!("ignoring unreadable receipt in upload reply: {}", err);
                None
            }
        },
    };
    Ok(UploadAccepted { message, data })
}

pub fn read_expense_list(reply: Reply) -> ApiResult<Vec<Expense>> {
    if let Some(msg) = reply.error_message() {
        return Err(ApiError::Application(msg));
    }
    if !reply.ok() {
        return Err(ApiError::Status(reply.status));
    }
    if !reply.body.is_array() {
        return Err(ApiError::Malformed(format!(
            "expected a list of expenses, got {}",
            kind_of(&reply.body)
        )));
    }
    serde_json::from_value(reply.body).map_err(|err| ApiError::Malformed(err.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// `gloo-net` transport against the configured endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpExpenseApi {
    upload_url: String,
    list_url: String,
}

impl HttpExpenseApi {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            upload_url: config.upload_url(),
            list_url: config.list_url(),
        }
    }
}

async fn read_reply(resp: Response) -> ApiResult<Reply> {
    let status = resp.status();
    let body = resp.json::<Value>().await?;
    Ok(Reply { status, body })
}

impl ExpenseApi for HttpExpenseApi {
    type Upload = FormData;

    async fn submit_receipt(&self, upload: FormData) -> ApiResult<Reply> {
        let resp = Request::post(&self.upload_url).body(upload)?.send().await?;
        read_reply(resp).await
    }

    async fn list_expenses(&self) -> ApiResult<Reply> {
        let resp = Request::get(&self.list_url).send().await?;
        read_reply(resp).await
    }
}
