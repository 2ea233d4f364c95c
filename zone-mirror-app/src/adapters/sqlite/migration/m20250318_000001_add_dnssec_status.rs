use sea_orm_migration::prelude::*;

use super::m20250312_000001_create_zone_tables::Zones;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Zones::Table)
                    .add_column(ColumnDef::new(Alias::new("dnssec_status")).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite cannot drop columns; the schema only evolves additively.
        Ok(())
    }
}
