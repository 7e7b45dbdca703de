/*
 * Responsibility
 * - POST /auth/logout: 提示された access token を revoke する
 * - 以降同じ token は middleware で 401
 */
use axum::{extract::State, http::StatusCode};

use crate::{
    api::v1::extractors::AuthCtxExtractor, error::AppError, services::auth::ensure_active,
    state::AppState,
};

pub async fn logout(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<StatusCode, AppError> {
    let user = ensure_active(ctx.user)?;
    state.auth.revoke(&ctx.token).await?;
    tracing::info!(user_id = %user.id, "token revoked on logout");
    Ok(StatusCode::NO_CONTENT)
}
