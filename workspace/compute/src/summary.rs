//! Credit card summary of a household for the billing cycle around a date.
//!
//! Each card gets its own billing cycle. Charges are taken from that cycle
//! while payments are taken from the calendar month of the reference date,
//! which is the window households settle their statements in.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info, instrument, warn};

use common::{
    AvailableCashDto, CardInfoDto, CardMovementsResponse, CardSummaryDto, ChargesDto, PaymentsDto,
    SummaryResponse, TotalsDto,
};
use model::entities::{household_member, payment_method, user};

use crate::balance::compute_balances;
use crate::billing_cycle::{BillingCycle, LedgerWindow, calendar_month_window, compute_cycle};
use crate::error::{ComputeError, Result};
use crate::ledger::{charges_in_window, payments_in_window};

/// Restricts a summary to some cards. Empty lists do not restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub card_ids: Vec<i32>,
    pub owner_ids: Vec<i32>,
}

impl SummaryFilter {
    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty() && self.owner_ids.is_empty()
    }
}

/// An active credit card of a household together with its owner's name.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdCard {
    pub card: payment_method::Model,
    pub owner_name: String,
}

/// Keeps the cards matching both the card id and the owner id lists,
/// preserving their order.
pub fn apply_filters(cards: Vec<HouseholdCard>, filter: &SummaryFilter) -> Vec<HouseholdCard> {
    if filter.is_empty() {
        return cards;
    }

    let card_ids: HashSet<i32> = filter.card_ids.iter().copied().collect();
    let owner_ids: HashSet<i32> = filter.owner_ids.iter().copied().collect();

    cards
        .into_iter()
        .filter(|entry| card_ids.is_empty() || card_ids.contains(&entry.card.id))
        .filter(|entry| owner_ids.is_empty() || owner_ids.contains(&entry.card.owner_id))
        .collect()
}

/// The household the user belongs to.
#[instrument(skip(db))]
pub async fn resolve_household(db: &DatabaseConnection, user_id: i32) -> Result<i32> {
    let membership = household_member::Entity::find()
        .filter(household_member::Column::UserId.eq(user_id))
        .order_by_asc(household_member::Column::HouseholdId)
        .one(db)
        .await?;

    match membership {
        Some(membership) => Ok(membership.household_id),
        None => {
            warn!("User {} does not belong to any household", user_id);
            Err(ComputeError::NotFound("household".to_string()))
        }
    }
}

/// Active credit cards of a household ordered by owner name, then card name.
#[instrument(skip(db))]
pub async fn household_credit_cards(db: &DatabaseConnection, household_id: i32) -> Result<Vec<HouseholdCard>> {
    let rows = payment_method::Entity::find()
        .filter(payment_method::Column::HouseholdId.eq(household_id))
        .filter(payment_method::Column::MethodType.eq(payment_method::PaymentMethodType::CreditCard))
        .filter(payment_method::Column::IsActive.eq(true))
        .find_also_related(user::Entity)
        .order_by_asc(user::Column::Name)
        .order_by_asc(payment_method::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(card, owner)| HouseholdCard {
            card,
            owner_name: owner.map(|owner| owner.name).unwrap_or_default(),
        })
        .collect())
}

/// Computes the summary of the caller's credit cards for the cycle around `cycle_date`.
#[instrument(skip(db, cycle_date), fields(cycle_date = %cycle_date.date_naive()))]
pub async fn get_summary<Tz: TimeZone>(
    db: &DatabaseConnection,
    user_id: i32,
    cycle_date: &DateTime<Tz>,
    filter: Option<&SummaryFilter>,
) -> Result<SummaryResponse> {
    let household_id = resolve_household(db, user_id).await?;

    let mut cards = household_credit_cards(db, household_id).await?;
    if let Some(filter) = filter {
        cards = apply_filters(cards, filter);
    }
    debug!("Summarising {} credit cards for household {}", cards.len(), household_id);

    let payments_window = payments_window(cycle_date);

    let mut summaries = Vec::with_capacity(cards.len());
    let mut totals = TotalsDto::default();

    for HouseholdCard { card, owner_name } in &cards {
        let cycle = compute_cycle(cycle_date, card.cutoff());
        let charges = charges_in_window(db, card.id, cycle.ledger_window()).await?;
        let payments = payments_in_window(db, card.id, payments_window).await?;

        let net_debt = charges.total - payments.total;
        totals.total_charges += charges.total;
        totals.total_payments += payments.total;
        totals.total_debt += net_debt;

        summaries.push(CardSummaryDto {
            id: card.id,
            name: card.name.clone(),
            owner_id: card.owner_id,
            owner_name: owner_name.clone(),
            cutoff_day: card.cutoff_day,
            institution: card.institution.clone(),
            last4: card.last4.clone(),
            billing_cycle: cycle.to_dto(),
            total_charges: charges.total,
            total_payments: payments.total,
            net_debt,
            movement_count: charges.count(),
            payment_count: payments.count(),
        });
    }

    let accounts = compute_balances(db, household_id, cycle_date.date_naive()).await?;
    let available_cash = AvailableCashDto {
        total: accounts.iter().map(|account| account.balance).sum(),
        accounts,
    };

    let representative_cutoff = cards.first().and_then(|entry| entry.card.cutoff());
    let billing_cycle = compute_cycle(cycle_date, representative_cutoff);
    let can_pay_all = available_cash.total >= totals.total_debt;

    info!(
        "Household {} owes {} across {} cards with {} available",
        household_id,
        totals.total_debt,
        summaries.len(),
        available_cash.total
    );

    Ok(SummaryResponse {
        billing_cycle: billing_cycle.to_dto(),
        cards: summaries,
        totals,
        available_cash,
        can_pay_all,
    })
}

/// Charges and payments of one credit card for the cycle around `cycle_date`.
///
/// Fails with `NotFound` when the card does not exist or is not a credit card,
/// and with `NotAuthorized` when it belongs to another household.
#[instrument(skip(db, cycle_date), fields(cycle_date = %cycle_date.date_naive()))]
pub async fn get_card_movements<Tz: TimeZone>(
    db: &DatabaseConnection,
    user_id: i32,
    card_id: i32,
    cycle_date: &DateTime<Tz>,
) -> Result<CardMovementsResponse> {
    let household_id = resolve_household(db, user_id).await?;

    let (card, owner) = payment_method::Entity::find_by_id(card_id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ComputeError::NotFound(format!("credit card {}", card_id)))?;

    if card.household_id != household_id {
        warn!(
            "User {} requested card {} of household {}",
            user_id, card_id, card.household_id
        );
        return Err(ComputeError::NotAuthorized);
    }
    if !card.is_credit_card() {
        return Err(ComputeError::NotFound(format!("credit card {}", card_id)));
    }

    let cycle: BillingCycle<Tz> = compute_cycle(cycle_date, card.cutoff());
    let charges = charges_in_window(db, card.id, cycle.ledger_window()).await?;
    let payments = payments_in_window(db, card.id, payments_window(cycle_date)).await?;
    let net_debt = charges.total - payments.total;

    Ok(CardMovementsResponse {
        credit_card: CardInfoDto {
            id: card.id,
            name: card.name,
            owner_name: owner.map(|owner| owner.name).unwrap_or_default(),
            cutoff_day: card.cutoff_day,
        },
        billing_cycle: cycle.to_dto(),
        charges: ChargesDto {
            movements: charges.records,
            total: charges.total,
        },
        payments: PaymentsDto {
            items: payments.records,
            total: payments.total,
        },
        net_debt,
    })
}

fn payments_window<Tz: TimeZone>(cycle_date: &DateTime<Tz>) -> LedgerWindow {
    let (month_start, next_month) = calendar_month_window(cycle_date);
    LedgerWindow::from_instants(&month_start, &next_month)
}
