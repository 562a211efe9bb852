//! SeaORM entity modules for the household finance tables.
//! The billing-cycle engine only reads these; creating and editing rows is
//! done by the rest of the household application.

pub mod account;
pub mod category;
pub mod contact;
pub mod credit_card_payment;
pub mod household;
pub mod household_member;
pub mod income;
pub mod movement;
pub mod payment_method;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::category::Entity as Category;
    pub use super::contact::Entity as Contact;
    pub use super::credit_card_payment::Entity as CreditCardPayment;
    pub use super::household::Entity as Household;
    pub use super::household_member::Entity as HouseholdMember;
    pub use super::income::Entity as Income;
    pub use super::movement::Entity as Movement;
    pub use super::payment_method::Entity as PaymentMethod;
    pub use super::user::Entity as User;
}
