//! Department queries

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entity::department;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<department::Model>, DbErr> {
    department::Entity::find_by_id(id).one(db).await
}

/// Ordered by name ascending
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<department::Model>, DbErr> {
    department::Entity::find()
        .order_by_asc(department::Column::DepartmentName)
        .all(db)
        .await
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<department::Model>, DbErr> {
    department::Entity::find()
        .filter(department::Column::DepartmentName.eq(name))
        .one(db)
        .await
}

pub async fn exists_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
    Ok(department::Entity::find_by_id(id).count(db).await? > 0)
}

/// Whether `name` is taken by a department other than `exclude_id`
pub async fn exists_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, DbErr> {
    let mut query = department::Entity::find().filter(department::Column::DepartmentName.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(department::Column::DepartmentId.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    record: department::ActiveModel,
) -> Result<department::Model, DbErr> {
    record.insert(db).await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    record: department::ActiveModel,
) -> Result<department::Model, DbErr> {
    record.update(db).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<DeleteResult, DbErr> {
    department::Entity::delete_by_id(id).exec(db).await
}
