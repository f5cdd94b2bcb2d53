use crate::shared::api_utils::{get_json, post_json, put_json};
use contracts::domain::a006_rebate::RebateDto;

pub async fn fetch_by_id(id: i64) -> Result<RebateDto, String> {
    get_json(&format!("/api/rebate/{}", id)).await
}

pub async fn save_form(dto: &RebateDto) -> Result<(), String> {
    match dto.id {
        Some(id) => put_json(&format!("/api/rebate/{}", id), dto).await,
        None => post_json("/api/rebate", dto).await,
    }
}
