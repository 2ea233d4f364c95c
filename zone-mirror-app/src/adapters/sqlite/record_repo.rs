//! `DnsRecordRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};

use zone_mirror_core::error::{CoreError, CoreResult};
use zone_mirror_core::traits::DnsRecordRepository;
use zone_mirror_core::types::DnsRecord;

use super::SqliteStore;
use super::entity::dns_record;

impl dns_record::Model {
    /// Convert a `SeaORM` row model into a domain `DnsRecord`.
    fn into_record(self) -> DnsRecord {
        DnsRecord {
            id: self.id,
            zone_id: self.zone_id,
            record_type: self.record_type,
            name: self.name,
            content: self.content,
            ttl: u32::try_from(self.ttl).unwrap_or(1),
            proxied: self.proxied,
            created_on: self.created_on,
            modified_on: self.modified_on,
            priority: self.priority.and_then(|p| u16::try_from(p).ok()),
        }
    }
}

/// Convert a domain `DnsRecord` into a `SeaORM` active model for upsert.
fn record_to_active_model(record: &DnsRecord) -> dns_record::ActiveModel {
    dns_record::ActiveModel {
        id: Set(record.id.clone()),
        zone_id: Set(record.zone_id.clone()),
        record_type: Set(record.record_type.clone()),
        name: Set(record.name.clone()),
        content: Set(record.content.clone()),
        ttl: Set(i64::from(record.ttl)),
        proxied: Set(record.proxied),
        created_on: Set(record.created_on.clone()),
        modified_on: Set(record.modified_on.clone()),
        priority: Set(record.priority.map(i32::from)),
    }
}

#[async_trait]
impl DnsRecordRepository for SqliteStore {
    async fn find_by_zone(&self, zone_id: &str) -> CoreResult<Vec<DnsRecord>> {
        let rows = dns_record::Entity::find()
            .filter(dns_record::Column::ZoneId.eq(zone_id))
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query DNS records: {e}")))?;

        Ok(rows.into_iter().map(dns_record::Model::into_record).collect())
    }

    async fn record_ids(&self, zone_id: &str) -> CoreResult<Vec<String>> {
        let ids = dns_record::Entity::find()
            .select_only()
            .column(dns_record::Column::Id)
            .filter(dns_record::Column::ZoneId.eq(zone_id))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query DNS record ids: {e}"))
            })?;

        Ok(ids)
    }

    async fn upsert(&self, record: &DnsRecord) -> CoreResult<()> {
        let active_model = record_to_active_model(record);

        dns_record::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(dns_record::Column::Id)
                    .update_columns([
                        dns_record::Column::ZoneId,
                        dns_record::Column::RecordType,
                        dns_record::Column::Name,
                        dns_record::Column::Content,
                        dns_record::Column::Ttl,
                        dns_record::Column::Proxied,
                        dns_record::Column::CreatedOn,
                        dns_record::Column::ModifiedOn,
                        dns_record::Column::Priority,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save DNS record: {e}")))?;

        Ok(())
    }

    async fn delete_not_in(&self, zone_id: &str, keep: &[String]) -> CoreResult<u64> {
        let mut delete =
            dns_record::Entity::delete_many().filter(dns_record::Column::ZoneId.eq(zone_id));
        if !keep.is_empty() {
            delete =
                delete.filter(dns_record::Column::Id.is_not_in(keep.iter().map(String::as_str)));
        }

        let result = delete.exec(&self.db).await.map_err(|e| {
            CoreError::StorageError(format!("Failed to delete stale DNS records: {e}"))
        })?;

        Ok(result.rows_affected)
    }
}
