use contracts::system::auth::UserInfo;

use crate::shared::api_utils::get_json;

/// Operator the desk is running as
pub async fn get_current_user() -> Result<UserInfo, String> {
    get_json("/api/system/auth/me").await
}
