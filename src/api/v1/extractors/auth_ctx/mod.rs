/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor (認証済みであれば OK)
 * - ActiveUser (認証済み かつ is_active)
 */

mod core;
mod types;

pub use core::{ActiveUser, AuthCtxExtractor};
pub use types::AuthCtx;
