/*
 * Responsibility
 * - GET /users/me: token から正規化したユーザーをそのまま返す (DB 参照なし)
 */
use axum::Json;

use crate::api::v1::{dto::users::UserResponse, extractors::ActiveUser};

pub async fn me(ActiveUser(user): ActiveUser) -> Json<UserResponse> {
    Json(user.into())
}
