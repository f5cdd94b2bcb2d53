use crate::shared::api_utils::{get_json, put_json};
use contracts::domain::a004_service_order::ServiceOrderEditDto;

pub async fn fetch_by_id(id: i64) -> Result<ServiceOrderEditDto, String> {
    get_json(&format!("/api/service-order/{}", id)).await
}

pub async fn save_form(id: i64, dto: &ServiceOrderEditDto) -> Result<(), String> {
    put_json(&format!("/api/service-order/{}", id), dto).await
}
