/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /users/me, /auth/logout, /calculations
 * - v1 配下はすべて Bearer 必須 (access middleware を routes 全体に掛ける)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::logout,
    calculations::{
        create_calculation, delete_calculation, get_calculation, list_calculations,
        update_calculation,
    },
    users::me,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/users/me", get(me))
        .route("/auth/logout", post(logout))
        .route(
            "/calculations",
            get(list_calculations).post(create_calculation),
        )
        .route(
            "/calculations/{id}",
            get(get_calculation)
                .put(update_calculation)
                .delete(delete_calculation),
        );

    middleware::auth::access::apply(router, state)
}
