use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde::{Deserialize, Serialize};

use crate::error_handler::AppError;

const QUERY_FIELD: &str = "query";

/// Urlencoded payload for `/ask/`.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub query: String,
}

/// The `query` form field, read from either an urlencoded or a
/// `multipart/form-data` body.
#[derive(Debug)]
pub struct AskQuery(pub String);

impl<S> FromRequest<S> for AskQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(AskForm { query }) = Form::<AskForm>::from_request(req, state).await?;
            return Ok(Self(query));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(QUERY_FIELD) {
                return Ok(Self(field.text().await?));
            }
        }
        Err(AppError::BadRequest(format!(
            "missing `{QUERY_FIELD}` form field"
        )))
    }
}

/// Response payload for `/ask/`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
