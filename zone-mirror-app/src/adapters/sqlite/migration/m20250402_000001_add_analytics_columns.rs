use sea_orm_migration::prelude::*;

use super::m20250312_000001_create_zone_tables::Zones;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite 每条 ALTER 只能加一列
        manager
            .alter_table(
                Table::alter()
                    .table(Zones::Table)
                    .add_column(
                        ColumnDef::new(Alias::new("analytics_requests"))
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Zones::Table)
                    .add_column(
                        ColumnDef::new(Alias::new("analytics_bandwidth"))
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Zones::Table)
                    .add_column(
                        ColumnDef::new(Alias::new("analytics_threats"))
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Zones::Table)
                    .add_column(
                        ColumnDef::new(Alias::new("analytics_updated"))
                            .string()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite cannot drop columns; the schema only evolves additively.
        Ok(())
    }
}
