/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http (request-id/trace/limit/timeout), cors, auth (bearer → AuthCtx)
 */
pub mod auth;
pub mod cors;
pub mod http;
