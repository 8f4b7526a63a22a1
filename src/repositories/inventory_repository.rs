use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::collections::HashMap;

use crate::entities::{inventory, inventory_location};

/// Stock of each live inventory record in `ids`. Missing or deleted records are
/// left out of the map.
pub async fn stock_by_id<C>(conn: &C, ids: &[i32]) -> Result<HashMap<i32, i64>, DbErr>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = inventory::Entity::find()
        .filter(inventory::Column::Id.is_in(ids.iter().copied()))
        .filter(inventory::Column::Deleted.eq(false))
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.id, i64::from(row.stock)))
        .collect())
}

/// Placement rows pointing at any of `bin_ids`.
pub async fn placements_in_bins<C>(
    conn: &C,
    bin_ids: &[i32],
) -> Result<Vec<inventory_location::Model>, DbErr>
where
    C: ConnectionTrait,
{
    if bin_ids.is_empty() {
        return Ok(Vec::new());
    }
    inventory_location::Entity::find()
        .filter(inventory_location::Column::BinId.is_in(bin_ids.iter().copied()))
        .all(conn)
        .await
}

/// Summed stock placed in each of `bin_ids`; empty bins map to zero.
pub async fn bin_occupancy<C>(conn: &C, bin_ids: &[i32]) -> Result<HashMap<i32, i64>, DbErr>
where
    C: ConnectionTrait,
{
    let mut occupancy: HashMap<i32, i64> = bin_ids.iter().map(|id| (*id, 0)).collect();
    let placements = placements_in_bins(conn, bin_ids).await?;
    let inventory_ids: Vec<i32> = placements.iter().map(|p| p.inventory_id).collect();
    let stock = stock_by_id(conn, &inventory_ids).await?;

    for placement in placements {
        let placed = stock.get(&placement.inventory_id).copied().unwrap_or(0);
        *occupancy.entry(placement.bin_id).or_insert(0) += placed;
    }
    Ok(occupancy)
}
