use crate::shared::api_utils::{get_json, put_json};
use contracts::domain::a003_job_order_assign::JobOrderAssignDto;

pub async fn fetch_by_id(job_order_id: i64) -> Result<JobOrderAssignDto, String> {
    get_json(&format!("/api/job-order/{}/assign", job_order_id)).await
}

pub async fn save_form(job_order_id: i64, dto: &JobOrderAssignDto) -> Result<(), String> {
    put_json(&format!("/api/job-order/{}/assign", job_order_id), dto).await
}
