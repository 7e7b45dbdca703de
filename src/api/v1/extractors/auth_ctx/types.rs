/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */

use crate::services::auth::CanonicalUser;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は token payload から正規化したユーザー
/// - `token` は提示された raw bearer token (logout で revoke するため)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user: CanonicalUser,
    pub token: String,
}

impl AuthCtx {
    pub fn new(user: CanonicalUser, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }
}
