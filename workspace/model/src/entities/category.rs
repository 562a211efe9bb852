use super::household;
use sea_orm::entity::prelude::*;

/// A spending category ("Mercado", "Transporte", ...), scoped to one household.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub household_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "household::Entity",
        from = "Column::HouseholdId",
        to = "household::Column::Id",
        on_delete = "Cascade"
    )]
    Household,
}

impl Related<household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
