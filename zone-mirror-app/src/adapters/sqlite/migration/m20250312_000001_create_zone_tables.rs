use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // zones 表
        manager
            .create_table(
                Table::create()
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Zones::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Zones::Name).string().not_null())
                    .col(ColumnDef::new(Zones::Status).string().not_null().default(""))
                    .col(ColumnDef::new(Zones::Type).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Zones::PlanName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::NameServers)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::OriginalNameServers)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::CreatedOn)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::ModifiedOn)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::AccountId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::AccountName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::OwnerEmail)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Zones::ActivatedOn)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Zones::LastUpdated).string().null())
                    .to_owned(),
            )
            .await?;

        // dns_records 表（zone 级联删除）
        manager
            .create_table(
                Table::create()
                    .table(DnsRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsRecords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DnsRecords::ZoneId).string().not_null())
                    .col(ColumnDef::new(DnsRecords::Type).string().not_null())
                    .col(ColumnDef::new(DnsRecords::Name).string().not_null())
                    .col(
                        ColumnDef::new(DnsRecords::Content)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::Ttl)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::Proxied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::CreatedOn)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::ModifiedOn)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(DnsRecords::Priority).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dns_records_zone_id")
                            .from(DnsRecords::Table, DnsRecords::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dns_records_zone_id")
                    .table(DnsRecords::Table)
                    .col(DnsRecords::ZoneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dns_records_type")
                    .table(DnsRecords::Table)
                    .col(DnsRecords::Type)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DnsRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Zones {
    #[sea_orm(iden = "zones")]
    Table,
    Id,
    Name,
    Status,
    Type,
    PlanName,
    NameServers,
    OriginalNameServers,
    CreatedOn,
    ModifiedOn,
    AccountId,
    AccountName,
    OwnerEmail,
    ActivatedOn,
    LastUpdated,
}

#[derive(DeriveIden)]
enum DnsRecords {
    #[sea_orm(iden = "dns_records")]
    Table,
    Id,
    ZoneId,
    Type,
    Name,
    Content,
    Ttl,
    Proxied,
    CreatedOn,
    ModifiedOn,
    Priority,
}
