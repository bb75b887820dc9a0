//! Staff entity - college employee record
//!
//! Table: staff

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub staff_id: i64,

    #[sea_orm(column_type = "String(Some(100))")]
    pub staff_name: String,

    pub department_id: i64,

    /// Monetary amount, two decimal places
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub salary: Decimal,

    pub created_date: DateTimeUtc,

    /// Refreshed on every mutation
    pub updated_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::DepartmentId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Department,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
