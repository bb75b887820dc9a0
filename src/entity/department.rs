//! Department entity - organizational unit owning staff records
//!
//! Table: department

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub department_id: i64,

    /// Department name (unique)
    #[sea_orm(column_type = "String(Some(100))", unique)]
    pub department_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Set on insert, never updated
    pub created_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff::Entity")]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
