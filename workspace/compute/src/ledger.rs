//! Charges and payments of a single credit card inside a date window.
//!
//! The aggregator does not know which window it is given. The summary feeds it
//! the card's billing cycle for charges and the calendar month for payments.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument, trace};

use common::{CardMovementDto, CardPaymentDto};
use model::entities::{account, category, contact, credit_card_payment, movement, user};

use crate::billing_cycle::LedgerWindow;
use crate::error::Result;

/// Payer name used when a movement has neither a user nor a contact.
pub const UNKNOWN_PAYER: &str = "Unknown";

/// Records of one ledger inside a window, most recent first, with their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSlice<T> {
    pub records: Vec<T>,
    pub total: Decimal,
}

impl<T> LedgerSlice<T> {
    fn new(records: Vec<T>, amount: impl Fn(&T) -> Decimal) -> Self {
        let total = records.iter().map(amount).sum();
        Self { records, total }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Movements paid with `card_id` whose date lies in `window`.
#[instrument(skip(db))]
pub async fn charges_in_window(
    db: &DatabaseConnection,
    card_id: i32,
    window: LedgerWindow,
) -> Result<LedgerSlice<CardMovementDto>> {
    let rows = movement::Entity::find()
        .filter(movement::Column::PaymentMethodId.eq(card_id))
        .filter(movement::Column::MovementDate.gte(window.start))
        .filter(movement::Column::MovementDate.lt(window.end_exclusive))
        .order_by_desc(movement::Column::MovementDate)
        .order_by_desc(movement::Column::Id)
        .find_also_related(category::Entity)
        .all(db)
        .await?;
    trace!("Loaded {} movements for card {}", rows.len(), card_id);

    let payers = payer_names(db, rows.iter().map(|(movement, _)| movement)).await?;

    let records = rows
        .into_iter()
        .map(|(movement, category)| CardMovementDto {
            id: movement.id,
            movement_type: movement.movement_type.as_str().to_string(),
            payer_name: payers.resolve(&movement),
            description: movement.description,
            amount: movement.amount,
            movement_date: movement.movement_date,
            category_name: category.map(|category| category.name),
        })
        .collect();

    let slice = LedgerSlice::new(records, |record: &CardMovementDto| record.amount);
    debug!("Card {} has {} charges totalling {}", card_id, slice.count(), slice.total);
    Ok(slice)
}

/// Payments made to `card_id` whose date lies in `window`.
#[instrument(skip(db))]
pub async fn payments_in_window(
    db: &DatabaseConnection,
    card_id: i32,
    window: LedgerWindow,
) -> Result<LedgerSlice<CardPaymentDto>> {
    let rows = credit_card_payment::Entity::find()
        .filter(credit_card_payment::Column::CreditCardId.eq(card_id))
        .filter(credit_card_payment::Column::PaymentDate.gte(window.start))
        .filter(credit_card_payment::Column::PaymentDate.lt(window.end_exclusive))
        .order_by_desc(credit_card_payment::Column::PaymentDate)
        .order_by_desc(credit_card_payment::Column::Id)
        .find_also_related(account::Entity)
        .all(db)
        .await?;

    let records = rows
        .into_iter()
        .map(|(payment, source)| CardPaymentDto {
            id: payment.id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            source_account_name: source.map(|account| account.name).unwrap_or_default(),
            notes: payment.notes,
        })
        .collect();

    let slice = LedgerSlice::new(records, |record: &CardPaymentDto| record.amount);
    debug!("Card {} has {} payments totalling {}", card_id, slice.count(), slice.total);
    Ok(slice)
}

/// Display names of the users and contacts that paid a set of movements.
#[derive(Debug, Default)]
struct PayerNames {
    users: HashMap<i32, String>,
    contacts: HashMap<i32, String>,
}

impl PayerNames {
    /// User name, else contact name, else [`UNKNOWN_PAYER`].
    fn resolve(&self, movement: &movement::Model) -> String {
        movement
            .payer_user_id
            .and_then(|id| self.users.get(&id))
            .or_else(|| movement.payer_contact_id.and_then(|id| self.contacts.get(&id)))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_PAYER.to_string())
    }
}

async fn payer_names<'a>(
    db: &DatabaseConnection,
    movements: impl Iterator<Item = &'a movement::Model>,
) -> Result<PayerNames> {
    let mut user_ids = Vec::new();
    let mut contact_ids = Vec::new();
    for movement in movements {
        user_ids.extend(movement.payer_user_id);
        contact_ids.extend(movement.payer_contact_id);
    }
    user_ids.sort_unstable();
    user_ids.dedup();
    contact_ids.sort_unstable();
    contact_ids.dedup();

    let mut names = PayerNames::default();
    if !user_ids.is_empty() {
        names.users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name))
            .collect();
    }
    if !contact_ids.is_empty() {
        names.contacts = contact::Entity::find()
            .filter(contact::Column::Id.is_in(contact_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|contact| (contact.id, contact.name))
            .collect();
    }
    Ok(names)
}
