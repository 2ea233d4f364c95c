//! `ZoneRepository` implementation for `SqliteStore`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect};

use zone_mirror_core::error::{CoreError, CoreResult};
use zone_mirror_core::traits::ZoneRepository;
use zone_mirror_core::types::{AnalyticsSummary, DnssecStatus, Zone, ZoneAnalytics, ZoneStatus};

use super::SqliteStore;
use super::entity::zone;

/// 名称服务器列表在列中的分隔符
const NAME_SERVER_SEPARATOR: &str = ",";

fn join_name_servers(servers: &[String]) -> String {
    servers.join(NAME_SERVER_SEPARATOR)
}

fn split_name_servers(column: &str) -> Vec<String> {
    column
        .split(NAME_SERVER_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_timestamp(value: Option<&str>, column: &str) -> CoreResult<Option<chrono::DateTime<Utc>>> {
    value
        .map(|s| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| CoreError::SerializationError(format!("Invalid {column}: {e}")))
        })
        .transpose()
}

impl zone::Model {
    /// Convert a `SeaORM` row model into a domain `Zone`.
    ///
    /// String-backed fields are parsed into strongly typed values; status
    /// strings outside the known vocabulary degrade to `Unknown`.
    fn into_zone(self) -> CoreResult<Zone> {
        let last_updated = parse_timestamp(self.last_updated.as_deref(), "last_updated")?;
        let analytics_updated =
            parse_timestamp(self.analytics_updated.as_deref(), "analytics_updated")?;

        Ok(Zone {
            id: self.id,
            name: self.name,
            status: ZoneStatus::from_remote(&self.status),
            zone_type: self.zone_type,
            plan_name: self.plan_name,
            name_servers: split_name_servers(&self.name_servers),
            original_name_servers: split_name_servers(&self.original_name_servers),
            created_on: self.created_on,
            modified_on: self.modified_on,
            account_id: self.account_id,
            account_name: self.account_name,
            owner_email: self.owner_email,
            activated_on: self.activated_on,
            analytics: ZoneAnalytics {
                requests: u64::try_from(self.analytics_requests).unwrap_or(0),
                bandwidth: u64::try_from(self.analytics_bandwidth).unwrap_or(0),
                threats: u64::try_from(self.analytics_threats).unwrap_or(0),
                updated_at: analytics_updated,
            },
            dnssec_status: self
                .dnssec_status
                .as_deref()
                .map(DnssecStatus::from_remote),
            last_updated,
        })
    }
}

/// Convert a domain `Zone` into a `SeaORM` active model for upsert.
///
/// The analytics and DNSSEC columns stay `NotSet`: they have dedicated
/// writers and must survive a plain upsert untouched.
fn zone_to_active_model(zone: &Zone) -> zone::ActiveModel {
    zone::ActiveModel {
        id: Set(zone.id.clone()),
        name: Set(zone.name.clone()),
        status: Set(zone.status.to_string()),
        zone_type: Set(zone.zone_type.clone()),
        plan_name: Set(zone.plan_name.clone()),
        name_servers: Set(join_name_servers(&zone.name_servers)),
        original_name_servers: Set(join_name_servers(&zone.original_name_servers)),
        created_on: Set(zone.created_on.clone()),
        modified_on: Set(zone.modified_on.clone()),
        account_id: Set(zone.account_id.clone()),
        account_name: Set(zone.account_name.clone()),
        owner_email: Set(zone.owner_email.clone()),
        activated_on: Set(zone.activated_on.clone()),
        last_updated: Set(Some(Utc::now().to_rfc3339())),
        ..Default::default()
    }
}

#[async_trait]
impl ZoneRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Zone>> {
        let rows = zone::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zones: {e}")))?;

        rows.into_iter().map(zone::Model::into_zone).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Zone>> {
        let row = zone::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zone: {e}")))?;

        row.map(zone::Model::into_zone).transpose()
    }

    async fn zone_ids(&self) -> CoreResult<Vec<String>> {
        let ids = zone::Entity::find()
            .select_only()
            .column(zone::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zone ids: {e}")))?;

        Ok(ids)
    }

    async fn upsert(&self, zone: &Zone) -> CoreResult<()> {
        let active_model = zone_to_active_model(zone);

        zone::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(zone::Column::Id)
                    .update_columns([
                        zone::Column::Name,
                        zone::Column::Status,
                        zone::Column::ZoneType,
                        zone::Column::PlanName,
                        zone::Column::NameServers,
                        zone::Column::OriginalNameServers,
                        zone::Column::CreatedOn,
                        zone::Column::ModifiedOn,
                        zone::Column::AccountId,
                        zone::Column::AccountName,
                        zone::Column::OwnerEmail,
                        zone::Column::ActivatedOn,
                        zone::Column::LastUpdated,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save zone: {e}")))?;

        Ok(())
    }

    async fn delete_not_in(&self, keep: &[String]) -> CoreResult<u64> {
        let mut delete = zone::Entity::delete_many();
        if !keep.is_empty() {
            delete = delete.filter(zone::Column::Id.is_not_in(keep.iter().map(String::as_str)));
        }

        let result = delete
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete stale zones: {e}")))?;

        Ok(result.rows_affected)
    }

    async fn update_analytics(&self, id: &str, summary: &AnalyticsSummary) -> CoreResult<()> {
        let model = zone::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zone: {e}")))?;

        match model {
            Some(_) => {
                let active = zone::ActiveModel {
                    id: Set(id.to_string()),
                    analytics_requests: Set(i64::try_from(summary.requests).unwrap_or(i64::MAX)),
                    analytics_bandwidth: Set(i64::try_from(summary.bandwidth).unwrap_or(i64::MAX)),
                    analytics_threats: Set(i64::try_from(summary.threats).unwrap_or(i64::MAX)),
                    analytics_updated: Set(summary.observed_at.map(|dt| dt.to_rfc3339())),
                    ..Default::default()
                };
                active.update(&self.db).await.map_err(|e| {
                    CoreError::StorageError(format!("Failed to update analytics: {e}"))
                })?;
                Ok(())
            }
            None => Err(CoreError::ZoneNotFound(id.to_string())),
        }
    }

    async fn update_dnssec_status(&self, id: &str, status: DnssecStatus) -> CoreResult<()> {
        let model = zone::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query zone: {e}")))?;

        match model {
            Some(_) => {
                let active = zone::ActiveModel {
                    id: Set(id.to_string()),
                    dnssec_status: Set(Some(status.to_string())),
                    ..Default::default()
                };
                active.update(&self.db).await.map_err(|e| {
                    CoreError::StorageError(format!("Failed to update DNSSEC status: {e}"))
                })?;
                Ok(())
            }
            None => Err(CoreError::ZoneNotFound(id.to_string())),
        }
    }

    async fn touch_stale(&self, staleness: Duration) -> CoreResult<u64> {
        let now = Utc::now();
        let cutoff = now
            - chrono::Duration::from_std(staleness)
                .map_err(|e| CoreError::ValidationError(format!("Invalid staleness window: {e}")))?;

        // RFC3339 strings with a fixed +00:00 offset compare lexicographically
        let result = zone::Entity::update_many()
            .col_expr(zone::Column::LastUpdated, Expr::value(now.to_rfc3339()))
            .filter(
                Condition::any()
                    .add(zone::Column::LastUpdated.is_null())
                    .add(zone::Column::LastUpdated.lt(cutoff.to_rfc3339())),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to refresh last_updated stamps: {e}"))
            })?;

        Ok(result.rows_affected)
    }
}
