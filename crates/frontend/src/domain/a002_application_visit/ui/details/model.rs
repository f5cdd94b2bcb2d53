use crate::shared::api_utils::{get_json, post_json, put_json};
use contracts::domain::a002_application_visit::ApplicationVisitDto;

pub async fn fetch_visit(application_id: i64, visit_id: i64) -> Result<ApplicationVisitDto, String> {
    get_json(&format!(
        "/api/application/{}/visit/{}",
        application_id, visit_id
    ))
    .await
}

pub async fn save_form(dto: &ApplicationVisitDto) -> Result<(), String> {
    match dto.visit_id {
        Some(visit_id) => {
            put_json(
                &format!("/api/application/{}/visit/{}", dto.application_id, visit_id),
                dto,
            )
            .await
        }
        None => {
            post_json(
                &format!("/api/application/{}/visit", dto.application_id),
                dto,
            )
            .await
        }
    }
}
