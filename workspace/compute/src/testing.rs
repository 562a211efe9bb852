//! Database fixtures shared by the compute tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::{
    account, category, contact, credit_card_payment, household, household_member, income, movement,
    payment_method, user,
};

pub type Result<T> = std::result::Result<T, DbErr>;

pub async fn setup_db() -> Result<DatabaseConnection> {
    // Connect to the SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    Migrator::up(&db, None).await?;
    Ok(db)
}

fn next_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub async fn new_user(db: &DatabaseConnection, name: &str) -> Result<user::Model> {
    user::ActiveModel {
        username: Set(format!("user_{}", next_id())),
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Fields of a movement to insert; `on` fills in the rest.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub household_id: i32,
    pub movement_type: movement::MovementType,
    pub description: String,
    pub amount: Decimal,
    pub movement_date: NaiveDate,
    pub category_id: Option<i32>,
    pub payer_user_id: Option<i32>,
    pub payer_contact_id: Option<i32>,
    pub payment_method_id: Option<i32>,
}

impl NewMovement {
    pub fn on(movement_date: NaiveDate, amount: i64) -> Self {
        Self {
            household_id: 0,
            movement_type: movement::MovementType::Household,
            description: format!("Movement {}", next_id()),
            amount: Decimal::new(amount, 0),
            movement_date,
            category_id: None,
            payer_user_id: None,
            payer_contact_id: None,
            payment_method_id: None,
        }
    }
}

pub async fn new_movement(db: &DatabaseConnection, new: NewMovement) -> Result<movement::Model> {
    movement::ActiveModel {
        household_id: Set(new.household_id),
        movement_type: Set(new.movement_type),
        description: Set(new.description),
        amount: Set(new.amount),
        movement_date: Set(new.movement_date),
        category_id: Set(new.category_id),
        payer_user_id: Set(new.payer_user_id),
        payer_contact_id: Set(new.payer_contact_id),
        payment_method_id: Set(new.payment_method_id),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// A household with one owning member, plus helpers to fill its ledgers.
#[derive(Debug, Clone)]
pub struct HouseholdFixture {
    pub household: household::Model,
    pub owner: user::Model,
}

impl HouseholdFixture {
    pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Self> {
        let household = household::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let owner = new_user(db, &format!("Owner of {}", name)).await?;
        let fixture = Self { household, owner };
        fixture.add_member(db, &fixture.owner, household_member::MemberRole::Owner).await?;
        Ok(fixture)
    }

    pub async fn add_member(
        &self,
        db: &DatabaseConnection,
        user: &user::Model,
        role: household_member::MemberRole,
    ) -> Result<household_member::Model> {
        household_member::ActiveModel {
            household_id: Set(self.household.id),
            user_id: Set(user.id),
            role: Set(role),
        }
        .insert(db)
        .await
    }

    /// Creates a user and adds it to the household as a member.
    pub async fn member(&self, db: &DatabaseConnection, name: &str) -> Result<user::Model> {
        let user = new_user(db, name).await?;
        self.add_member(db, &user, household_member::MemberRole::Member).await?;
        Ok(user)
    }

    pub async fn contact(&self, db: &DatabaseConnection, name: &str) -> Result<contact::Model> {
        contact::ActiveModel {
            household_id: Set(self.household.id),
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn category(&self, db: &DatabaseConnection, name: &str) -> Result<category::Model> {
        category::ActiveModel {
            household_id: Set(self.household.id),
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn account(
        &self,
        db: &DatabaseConnection,
        name: &str,
        account_type: account::AccountType,
        initial_balance: i64,
    ) -> Result<account::Model> {
        account::ActiveModel {
            household_id: Set(self.household.id),
            owner_id: Set(self.owner.id),
            name: Set(name.to_string()),
            account_type: Set(account_type),
            initial_balance: Set(Some(Decimal::new(initial_balance, 0))),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn savings_account(
        &self,
        db: &DatabaseConnection,
        name: &str,
        initial_balance: i64,
    ) -> Result<account::Model> {
        self.account(db, name, account::AccountType::Savings, initial_balance)
            .await
    }

    async fn payment_method(
        &self,
        db: &DatabaseConnection,
        owner: &user::Model,
        name: &str,
        method_type: payment_method::PaymentMethodType,
        cutoff_day: Option<i32>,
        linked_account: Option<&account::Model>,
    ) -> Result<payment_method::Model> {
        payment_method::ActiveModel {
            household_id: Set(self.household.id),
            owner_id: Set(owner.id),
            name: Set(name.to_string()),
            method_type: Set(method_type),
            cutoff_day: Set(cutoff_day),
            linked_account_id: Set(linked_account.map(|account| account.id)),
            institution: Set(None),
            last4: Set(None),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn credit_card(
        &self,
        db: &DatabaseConnection,
        name: &str,
        cutoff_day: Option<i32>,
    ) -> Result<payment_method::Model> {
        self.credit_card_of(db, &self.owner, name, cutoff_day).await
    }

    pub async fn credit_card_of(
        &self,
        db: &DatabaseConnection,
        owner: &user::Model,
        name: &str,
        cutoff_day: Option<i32>,
    ) -> Result<payment_method::Model> {
        self.payment_method(
            db,
            owner,
            name,
            payment_method::PaymentMethodType::CreditCard,
            cutoff_day,
            None,
        )
        .await
    }

    pub async fn debit_card(
        &self,
        db: &DatabaseConnection,
        name: &str,
        linked_account: &account::Model,
    ) -> Result<payment_method::Model> {
        self.payment_method(
            db,
            &self.owner,
            name,
            payment_method::PaymentMethodType::DebitCard,
            None,
            Some(linked_account),
        )
        .await
    }

    pub async fn cash_method(
        &self,
        db: &DatabaseConnection,
        name: &str,
        linked_account: &account::Model,
    ) -> Result<payment_method::Model> {
        self.payment_method(
            db,
            &self.owner,
            name,
            payment_method::PaymentMethodType::Cash,
            None,
            Some(linked_account),
        )
        .await
    }

    /// A household movement paid by the owner with `method`.
    pub async fn charge(
        &self,
        db: &DatabaseConnection,
        method: &payment_method::Model,
        date: NaiveDate,
        amount: i64,
    ) -> Result<movement::Model> {
        new_movement(
            db,
            NewMovement {
                household_id: self.household.id,
                payer_user_id: Some(self.owner.id),
                payment_method_id: Some(method.id),
                ..NewMovement::on(date, amount)
            },
        )
        .await
    }

    pub async fn payment(
        &self,
        db: &DatabaseConnection,
        card: &payment_method::Model,
        source: &account::Model,
        date: NaiveDate,
        amount: i64,
    ) -> Result<credit_card_payment::Model> {
        credit_card_payment::ActiveModel {
            household_id: Set(self.household.id),
            credit_card_id: Set(card.id),
            amount: Set(Decimal::new(amount, 0)),
            payment_date: Set(date),
            notes: Set(None),
            source_account_id: Set(source.id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn income(
        &self,
        db: &DatabaseConnection,
        account: &account::Model,
        date: NaiveDate,
        amount: i64,
    ) -> Result<income::Model> {
        income::ActiveModel {
            household_id: Set(self.household.id),
            account_id: Set(account.id),
            description: Set("Salario".to_string()),
            amount: Set(Decimal::new(amount, 0)),
            income_date: Set(date),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
