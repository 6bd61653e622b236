//! Client metadata extractor for unauthenticated share access routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use snipshare_core::error::AppError;
use snipshare_service::share::ClientMeta;

use crate::state::AppState;

/// Extracts IP and User-Agent for access logging. Never rejects.
#[derive(Debug, Clone)]
pub struct ClientMetaParams(pub ClientMeta);

impl FromRequestParts<AppState> for ClientMetaParams {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .unwrap_or("unknown")
            .trim()
            .to_string();

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ClientMetaParams(ClientMeta {
            ip_address,
            user_agent,
        }))
    }
}
