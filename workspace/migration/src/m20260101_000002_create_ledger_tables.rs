use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260101_000001_create_table::{
    Accounts, Categories, Contacts, Households, PaymentMethods, Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create movements table
        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(pk_auto(Movements::Id))
                    .col(integer(Movements::HouseholdId))
                    .col(string_len(Movements::MovementType, 20))
                    .col(string(Movements::Description))
                    .col(decimal_len(Movements::Amount, 16, 4))
                    .col(date(Movements::MovementDate))
                    .col(integer_null(Movements::CategoryId))
                    .col(integer_null(Movements::PayerUserId))
                    .col(integer_null(Movements::PayerContactId))
                    .col(integer_null(Movements::PaymentMethodId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_household")
                            .from(Movements::Table, Movements::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_category")
                            .from(Movements::Table, Movements::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_payer_user")
                            .from(Movements::Table, Movements::PayerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_payer_contact")
                            .from(Movements::Table, Movements::PayerContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_payment_method")
                            .from(Movements::Table, Movements::PaymentMethodId)
                            .to(PaymentMethods::Table, PaymentMethods::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_movements_payment_method_date")
                    .table(Movements::Table)
                    .col(Movements::PaymentMethodId)
                    .col(Movements::MovementDate)
                    .to_owned(),
            )
            .await?;

        // Create credit_card_payments table
        manager
            .create_table(
                Table::create()
                    .table(CreditCardPayments::Table)
                    .if_not_exists()
                    .col(pk_auto(CreditCardPayments::Id))
                    .col(integer(CreditCardPayments::HouseholdId))
                    .col(integer(CreditCardPayments::CreditCardId))
                    .col(decimal_len(CreditCardPayments::Amount, 16, 4))
                    .col(date(CreditCardPayments::PaymentDate))
                    .col(string_null(CreditCardPayments::Notes))
                    .col(integer(CreditCardPayments::SourceAccountId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_card_payments_household")
                            .from(CreditCardPayments::Table, CreditCardPayments::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_card_payments_card")
                            .from(CreditCardPayments::Table, CreditCardPayments::CreditCardId)
                            .to(PaymentMethods::Table, PaymentMethods::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_card_payments_source_account")
                            .from(CreditCardPayments::Table, CreditCardPayments::SourceAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create income table
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(pk_auto(Income::Id))
                    .col(integer(Income::HouseholdId))
                    .col(integer(Income::AccountId))
                    .col(string(Income::Description))
                    .col(decimal_len(Income::Amount, 16, 4))
                    .col(date(Income::IncomeDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_household")
                            .from(Income::Table, Income::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_account")
                            .from(Income::Table, Income::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CreditCardPayments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movements {
    Table,
    Id,
    HouseholdId,
    MovementType,
    Description,
    Amount,
    MovementDate,
    CategoryId,
    PayerUserId,
    PayerContactId,
    PaymentMethodId,
}

#[derive(DeriveIden)]
enum CreditCardPayments {
    Table,
    Id,
    HouseholdId,
    CreditCardId,
    Amount,
    PaymentDate,
    Notes,
    SourceAccountId,
}

#[derive(DeriveIden)]
enum Income {
    Table,
    Id,
    HouseholdId,
    AccountId,
    Description,
    Amount,
    IncomeDate,
}
