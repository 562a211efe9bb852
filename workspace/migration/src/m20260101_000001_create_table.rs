use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Name))
                    .to_owned(),
            )
            .await?;

        // Create households table
        manager
            .create_table(
                Table::create()
                    .table(Households::Table)
                    .if_not_exists()
                    .col(pk_auto(Households::Id))
                    .col(string(Households::Name))
                    .to_owned(),
            )
            .await?;

        // Create household_members table (join table)
        manager
            .create_table(
                Table::create()
                    .table(HouseholdMembers::Table)
                    .if_not_exists()
                    .col(integer(HouseholdMembers::HouseholdId))
                    .col(integer(HouseholdMembers::UserId))
                    .col(string_len(HouseholdMembers::Role, 20).default("member"))
                    .primary_key(
                        Index::create()
                            .name("pk_household_members")
                            .col(HouseholdMembers::HouseholdId)
                            .col(HouseholdMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_household_members_household")
                            .from(HouseholdMembers::Table, HouseholdMembers::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_household_members_user")
                            .from(HouseholdMembers::Table, HouseholdMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create contacts table
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(pk_auto(Contacts::Id))
                    .col(integer(Contacts::HouseholdId))
                    .col(string(Contacts::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contacts_household")
                            .from(Contacts::Table, Contacts::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(integer(Categories::HouseholdId))
                    .col(string(Categories::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_household")
                            .from(Categories::Table, Categories::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(integer(Accounts::HouseholdId))
                    .col(integer(Accounts::OwnerId))
                    .col(string(Accounts::Name))
                    .col(string_len(Accounts::AccountType, 20))
                    .col(decimal_len_null(Accounts::InitialBalance, 16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_household")
                            .from(Accounts::Table, Accounts::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_owner")
                            .from(Accounts::Table, Accounts::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payment_methods table
        manager
            .create_table(
                Table::create()
                    .table(PaymentMethods::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentMethods::Id))
                    .col(integer(PaymentMethods::HouseholdId))
                    .col(integer(PaymentMethods::OwnerId))
                    .col(string(PaymentMethods::Name))
                    .col(string_len(PaymentMethods::MethodType, 20))
                    .col(integer_null(PaymentMethods::LinkedAccountId))
                    .col(string_null(PaymentMethods::Institution))
                    .col(string_len_null(PaymentMethods::Last4, 4))
                    .col(boolean(PaymentMethods::IsActive).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_methods_household")
                            .from(PaymentMethods::Table, PaymentMethods::HouseholdId)
                            .to(Households::Table, Households::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_methods_owner")
                            .from(PaymentMethods::Table, PaymentMethods::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_methods_linked_account")
                            .from(PaymentMethods::Table, PaymentMethods::LinkedAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(PaymentMethods::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HouseholdMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Households::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Households {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum HouseholdMembers {
    Table,
    HouseholdId,
    UserId,
    Role,
}

#[derive(DeriveIden)]
pub(crate) enum Contacts {
    Table,
    Id,
    HouseholdId,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Categories {
    Table,
    Id,
    HouseholdId,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Accounts {
    Table,
    Id,
    HouseholdId,
    OwnerId,
    Name,
    AccountType,
    InitialBalance,
}

#[derive(DeriveIden)]
pub(crate) enum PaymentMethods {
    Table,
    Id,
    HouseholdId,
    OwnerId,
    Name,
    MethodType,
    LinkedAccountId,
    Institution,
    Last4,
    IsActive,
}
