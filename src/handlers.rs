pub mod credit_cards;
pub mod health;
