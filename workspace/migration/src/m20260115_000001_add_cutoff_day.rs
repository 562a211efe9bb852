use sea_orm_migration::prelude::*;

use crate::m20260101_000001_create_table::PaymentMethods;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // NULL means the statement closes on the last day of each month
        manager
            .alter_table(
                Table::alter()
                    .table(PaymentMethods::Table)
                    .add_column(ColumnDef::new(Alias::new("cutoff_day")).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(PaymentMethods::Table)
                    .drop_column(Alias::new("cutoff_day"))
                    .to_owned(),
            )
            .await
    }
}
