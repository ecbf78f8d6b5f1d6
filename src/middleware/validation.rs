use axum::{
    async_trait,
    extract::{rejection::{JsonRejection, QueryRejection}, FromRequest, FromRequestParts, Query},
    http::{request::Parts, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::models::api_models::{ApiResponse, FieldError};

///
/// Field-level checks a request body or query runs after deserialization.
/// Returns every failing field, not just the first.
///
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

#[derive(Debug, PartialEq)]
pub struct ValidationError {
    pub details: Vec<FieldError>,
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        Self { details: vec![FieldError::new("body", rejection.body_text())] }
    }
}

impl From<QueryRejection> for ValidationError {
    fn from(rejection: QueryRejection) -> Self {
        Self { details: vec![FieldError::new("query", rejection.body_text())] }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let mut body = ApiResponse::failure(StatusCode::BAD_REQUEST, "Validation failed");
        body.details = Some(self.details);
        body.into_response()
    }
}

fn check<T: Validate>(value: T) -> Result<T, ValidationError> {
    let details = value.validate();
    if details.is_empty() {
        Ok(value)
    } else {
        Err(ValidationError { details })
    }
}

///
/// JSON body extractor which rejects malformed bodies and bodies failing
/// `Validate` with a 400 and field details
///
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: Send + 'static,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(check(value)?))
    }
}

///
/// Query string extractor with the same rejection shape as `ValidJson`
///
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(check(value)?))
    }
}

///
/// Loose email shape check: one `@` with a non-empty local part
/// and a dotted domain
///
pub fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}
