use crate::shared::api_utils::{get_json, post_json, put_json};
use contracts::domain::a001_lcp_nap_location::LcpNapLocationDto;

/// Load an existing location by ID
pub async fn fetch_by_id(id: i64) -> Result<LcpNapLocationDto, String> {
    get_json(&format!("/api/lcp-nap-location/{}", id)).await
}

/// Create or update, depending on whether the DTO carries an ID
pub async fn save_form(dto: &LcpNapLocationDto) -> Result<(), String> {
    match dto.id {
        Some(id) => put_json(&format!("/api/lcp-nap-location/{}", id), dto).await,
        None => post_json("/api/lcp-nap-location", dto).await,
    }
}
