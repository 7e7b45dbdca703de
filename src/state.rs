/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - calculations: CalculationRepo (Postgres or in-memory), auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::CalculationRepo;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub calculations: Arc<dyn CalculationRepo>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(calculations: Arc<dyn CalculationRepo>, auth: Arc<AuthService>) -> Self {
        Self { calculations, auth }
    }
}
