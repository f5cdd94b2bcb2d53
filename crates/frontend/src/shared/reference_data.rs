//! Reference-data fetches used by the cascading selectors

use crate::shared::api_utils::get_json;
use contracts::domain::common::{GeoEntity, GeoKind, LcpNapNode, PortSlot};
use serde::Serialize;

#[derive(Serialize)]
struct UsedPortsQuery {
    #[serde(rename = "excludeServiceOrderId", skip_serializing_if = "Option::is_none")]
    exclude_service_order_id: Option<i64>,
}

/// Load one level of the geographic hierarchy
pub async fn fetch_geo(kind: GeoKind) -> Result<Vec<GeoEntity>, String> {
    get_json(&format!("/api/geo/{}", kind.code())).await
}

/// Load all four geographic levels; fails if any level fails
pub async fn fetch_all_geo() -> Result<Vec<GeoEntity>, String> {
    let mut entities = Vec::new();
    for kind in GeoKind::all() {
        let level = fetch_geo(kind).await.map_err(|e| {
            log::error!("Failed to load {} list: {}", kind.code(), e);
            e
        })?;
        entities.extend(level);
    }
    Ok(entities)
}

pub async fn fetch_lcp_nap_nodes() -> Result<Vec<LcpNapNode>, String> {
    get_json("/api/lcp-nap").await
}

/// Occupied ports of a node. The order under edit is passed so the backend
/// can leave its own port out.
pub async fn fetch_used_ports(
    node_id: i64,
    exclude_service_order_id: Option<i64>,
) -> Result<Vec<PortSlot>, String> {
    let query = serde_qs::to_string(&UsedPortsQuery {
        exclude_service_order_id,
    })
    .map_err(|e| e.to_string())?;

    let mut path = format!("/api/lcp-nap/{}/used-ports", node_id);
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query);
    }
    get_json(&path).await
}
