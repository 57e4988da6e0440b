use axum::Json;
use contracts::system::auth::UserInfo;

use crate::shared::config;

/// GET /api/system/auth/me
pub async fn current_user() -> Json<UserInfo> {
    Json(config::current().auth.user_info())
}
