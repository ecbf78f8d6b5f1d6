use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    headers::{authorization::Bearer, Authorization},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    TypedHeader,
};

use crate::{models::api_models::ApiResponse, services::token_service::TokenService};

/// The authenticated caller, inserted by `auth_middleware`
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContext { pub user_id: i64 }

/// Present when the bearer token is the admin secret
#[derive(Clone, Debug)]
pub struct AdminContext;

pub struct Unauthorized(&'static str);

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        ApiResponse::failure(StatusCode::UNAUTHORIZED, self.0).into_response()
    }
}

#[async_trait]
impl <S : Send + Sync> FromRequestParts<S> for AuthContext {
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>()
            .cloned()
            .ok_or(Unauthorized("Unauthorized. Please sign in"))
    }
}

#[async_trait]
impl <S : Send + Sync> FromRequestParts<S> for AdminContext {
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AdminContext>()
            .cloned()
            .ok_or(Unauthorized("Unauthorized. Admin only"))
    }
}

///
/// Resolves the `Authorization: Bearer` header into an `AuthContext` or
/// `AdminContext` request extension. Requests without a valid token pass
/// through untouched; handlers decide whether a context is required.
///
pub async fn auth_middleware<B : Send> (
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    State(token_service): State<Arc<dyn TokenService>>,
    mut request: Request<B>,
    next: Next<B>
) -> Response {
    if let Some(bearer) = bearer {
        let access_token = bearer.token();

        if token_service.is_admin_token(access_token) {
            request.extensions_mut().insert(AdminContext);
        } else {
            match token_service.verify_access_token(access_token) {
                Ok(user_id) => { request.extensions_mut().insert(AuthContext { user_id }); },
                Err(e) => log::debug!("Rejected bearer token: {e}"),
            }
        }
    }
    next.run(request).await
}
