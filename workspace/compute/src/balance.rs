//! Available cash per savings and cash account.
//!
//! The balance of an account is
//! `initial_balance + income - debit card spending - cash spending - card payments`.
//! Each term is its own pass over one ledger so it can be checked on its own.
//! The sums cover the whole ledger history: the reference date is accepted but
//! does not bound them.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use common::AccountBalanceDto;
use model::entities::{account, credit_card_payment, income, movement, payment_method};

use crate::error::Result;

/// Sum of one ledger per account id. Accounts without rows are absent.
pub type AccountTotals = HashMap<i32, Decimal>;

/// Income credited to each of `account_ids`.
#[instrument(skip(db))]
pub async fn income_by_account(db: &DatabaseConnection, account_ids: &[i32]) -> Result<AccountTotals> {
    let rows = income::Entity::find()
        .filter(income::Column::AccountId.is_in(account_ids.iter().copied()))
        .all(db)
        .await?;

    Ok(accumulate(rows.into_iter().map(|row| (row.account_id, row.amount))))
}

/// Movements paid with debit cards linked to each of `account_ids`.
#[instrument(skip(db))]
pub async fn debit_card_spending_by_account(
    db: &DatabaseConnection,
    account_ids: &[i32],
) -> Result<AccountTotals> {
    spending_by_linked_account(db, account_ids, payment_method::PaymentMethodType::DebitCard).await
}

/// Movements paid with cash payment methods linked to each of `account_ids`.
#[instrument(skip(db))]
pub async fn cash_spending_by_account(db: &DatabaseConnection, account_ids: &[i32]) -> Result<AccountTotals> {
    spending_by_linked_account(db, account_ids, payment_method::PaymentMethodType::Cash).await
}

/// Credit card payments taken from each of `account_ids`.
#[instrument(skip(db))]
pub async fn card_payments_by_account(db: &DatabaseConnection, account_ids: &[i32]) -> Result<AccountTotals> {
    let rows = credit_card_payment::Entity::find()
        .filter(credit_card_payment::Column::SourceAccountId.is_in(account_ids.iter().copied()))
        .all(db)
        .await?;

    Ok(accumulate(rows.into_iter().map(|row| (row.source_account_id, row.amount))))
}

async fn spending_by_linked_account(
    db: &DatabaseConnection,
    account_ids: &[i32],
    method_type: payment_method::PaymentMethodType,
) -> Result<AccountTotals> {
    let rows = movement::Entity::find()
        .find_also_related(payment_method::Entity)
        .filter(payment_method::Column::MethodType.eq(method_type))
        .filter(payment_method::Column::LinkedAccountId.is_in(account_ids.iter().copied()))
        .all(db)
        .await?;

    Ok(accumulate(rows.into_iter().filter_map(|(movement, method)| {
        method
            .and_then(|method| method.linked_account_id)
            .map(|account_id| (account_id, movement.amount))
    })))
}

fn accumulate(rows: impl Iterator<Item = (i32, Decimal)>) -> AccountTotals {
    let mut totals = AccountTotals::new();
    for (account_id, amount) in rows {
        *totals.entry(account_id).or_insert(Decimal::ZERO) += amount;
    }
    totals
}

/// Computes the balance of every savings and cash account of a household,
/// ordered by account name.
#[instrument(skip(db))]
pub async fn compute_balances(
    db: &DatabaseConnection,
    household_id: i32,
    as_of: NaiveDate,
) -> Result<Vec<AccountBalanceDto>> {
    let accounts = account::Entity::find()
        .filter(account::Column::HouseholdId.eq(household_id))
        .filter(account::Column::AccountType.is_in([
            account::AccountType::Savings,
            account::AccountType::Cash,
        ]))
        .order_by_asc(account::Column::Name)
        .order_by_asc(account::Column::Id)
        .all(db)
        .await?;

    if accounts.is_empty() {
        debug!("Household {} has no savings or cash accounts", household_id);
        return Ok(Vec::new());
    }

    let account_ids: Vec<i32> = accounts.iter().map(|account| account.id).collect();
    let income = income_by_account(db, &account_ids).await?;
    let debit_spending = debit_card_spending_by_account(db, &account_ids).await?;
    let cash_spending = cash_spending_by_account(db, &account_ids).await?;
    let card_payments = card_payments_by_account(db, &account_ids).await?;

    let term = |totals: &AccountTotals, id: i32| totals.get(&id).copied().unwrap_or(Decimal::ZERO);

    let balances = accounts
        .into_iter()
        .map(|account| {
            let balance = account.initial_balance.unwrap_or(Decimal::ZERO) + term(&income, account.id)
                - term(&debit_spending, account.id)
                - term(&cash_spending, account.id)
                - term(&card_payments, account.id);
            debug!("Account {} ({}) balance {}", account.id, account.name, balance);

            AccountBalanceDto {
                id: account.id,
                name: account.name,
                account_type: account.account_type.as_str().to_string(),
                balance,
            }
        })
        .collect();

    Ok(balances)
}
