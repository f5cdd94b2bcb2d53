use crate::shared::api_utils::{get_json, post_json, put_json};
use contracts::domain::a005_discount::DiscountDto;

pub async fn fetch_by_id(id: i64) -> Result<DiscountDto, String> {
    get_json(&format!("/api/discount/{}", id)).await
}

pub async fn save_form(dto: &DiscountDto) -> Result<(), String> {
    match dto.id {
        Some(id) => put_json(&format!("/api/discount/{}", id), dto).await,
        None => post_json("/api/discount", dto).await,
    }
}
