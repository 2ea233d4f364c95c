//! `SeaORM` entity for the `zones` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "zones")]
/// Database row model for a cached zone.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub status: String,
    #[sea_orm(column_name = "type")]
    pub zone_type: String,
    pub plan_name: String,
    /// Comma-joined name server list.
    pub name_servers: String,
    pub original_name_servers: String,
    pub created_on: String,
    pub modified_on: String,
    pub account_id: String,
    pub account_name: String,
    pub owner_email: String,
    pub activated_on: String,
    pub last_updated: Option<String>,
    pub dnssec_status: Option<String>,
    pub analytics_requests: i64,
    pub analytics_bandwidth: i64,
    pub analytics_threats: i64,
    pub analytics_updated: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dns_record::Entity")]
    DnsRecord,
}

impl Related<super::dns_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DnsRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
