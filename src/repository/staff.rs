//! Staff queries
//!
//! Every function takes any `ConnectionTrait`, so callers decide whether it
//! runs on the pool or inside a transaction. The `*_query` builders are the
//! predicate translations; the async functions only execute them.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::entity::staff;

pub fn all_query() -> Select<staff::Entity> {
    staff::Entity::find().order_by_asc(staff::Column::StaffId)
}

pub fn by_department_query(department_id: i64) -> Select<staff::Entity> {
    all_query().filter(staff::Column::DepartmentId.eq(department_id))
}

/// Case-insensitive substring match on the staff name
pub fn name_containing_query(fragment: &str) -> Select<staff::Entity> {
    all_query().filter(
        Expr::expr(Func::lower(Expr::col(staff::Column::StaffName)))
            .like(LikeExpr::new(contains_pattern(fragment)).escape('\\')),
    )
}

pub fn salary_at_least_query(threshold: Decimal) -> Select<staff::Entity> {
    all_query().filter(staff::Column::Salary.gte(threshold))
}

/// Inclusive on both ends
pub fn salary_between_query(min: Decimal, max: Decimal) -> Select<staff::Entity> {
    all_query().filter(staff::Column::Salary.between(min, max))
}

/// Highest salary first, lowest id wins a tie
pub fn top_by_salary_query() -> Select<staff::Entity> {
    staff::Entity::find()
        .order_by_desc(staff::Column::Salary)
        .order_by_asc(staff::Column::StaffId)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<staff::Model>, DbErr> {
    staff::Entity::find_by_id(id).one(db).await
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<staff::Model>, DbErr> {
    all_query().all(db).await
}

pub async fn find_by_department_id<C: ConnectionTrait>(
    db: &C,
    department_id: i64,
) -> Result<Vec<staff::Model>, DbErr> {
    by_department_query(department_id).all(db).await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(
    db: &C,
    fragment: &str,
) -> Result<Vec<staff::Model>, DbErr> {
    name_containing_query(fragment).all(db).await
}

pub async fn find_by_salary_greater_or_equal<C: ConnectionTrait>(
    db: &C,
    threshold: Decimal,
) -> Result<Vec<staff::Model>, DbErr> {
    salary_at_least_query(threshold).all(db).await
}

pub async fn find_by_salary_between<C: ConnectionTrait>(
    db: &C,
    min: Decimal,
    max: Decimal,
) -> Result<Vec<staff::Model>, DbErr> {
    salary_between_query(min, max).all(db).await
}

pub async fn find_top_by_salary_descending<C: ConnectionTrait>(
    db: &C,
) -> Result<Option<staff::Model>, DbErr> {
    top_by_salary_query().one(db).await
}

pub async fn count_by_department_id<C: ConnectionTrait>(db: &C, department_id: i64) -> Result<u64, DbErr> {
    staff::Entity::find()
        .filter(staff::Column::DepartmentId.eq(department_id))
        .count(db)
        .await
}

pub async fn exists_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
    Ok(staff::Entity::find_by_id(id).count(db).await? > 0)
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: staff::ActiveModel) -> Result<staff::Model, DbErr> {
    record.insert(db).await
}

pub async fn update<C: ConnectionTrait>(db: &C, record: staff::ActiveModel) -> Result<staff::Model, DbErr> {
    record.update(db).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<DeleteResult, DbErr> {
    staff::Entity::delete_by_id(id).exec(db).await
}

/// `%fragment%`, lowercased, with LIKE metacharacters escaped
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{count_row, executed_sql, staff_model};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait};
    use std::str::FromStr;

    fn sql(select: Select<staff::Entity>) -> String {
        select.build(DatabaseBackend::Postgres).to_string()
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("Jo"), "%jo%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_name_search_is_case_insensitive() {
        let sql = sql(name_containing_query("JO"));
        assert!(sql.contains(r#"LOWER("staff_name")"#), "{sql}");
        assert!(sql.contains("LIKE '%jo%'"), "{sql}");
    }

    #[test]
    fn test_salary_between_is_inclusive() {
        let sql = sql(salary_between_query(Decimal::from(1000), Decimal::from(5000)));
        assert!(sql.contains(r#""staff"."salary" BETWEEN 1000 AND 5000"#), "{sql}");
    }

    #[test]
    fn test_salary_threshold() {
        let threshold = Decimal::from_str("2500.50").unwrap();
        let sql = sql(salary_at_least_query(threshold));
        assert!(sql.contains(r#""staff"."salary" >= 2500.50"#), "{sql}");
    }

    #[test]
    fn test_department_filter() {
        let sql = sql(by_department_query(4));
        assert!(sql.contains(r#""staff"."department_id" = 4"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "staff"."staff_id" ASC"#), "{sql}");
    }

    #[tokio::test]
    async fn test_top_by_salary_picks_highest() {
        let highest = staff_model(2, "Mina", 1, "7000.00");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![highest.clone()]])
            .into_connection();

        let top = find_top_by_salary_descending(&db).await.unwrap();
        assert_eq!(top, Some(highest));

        let log = executed_sql(db);
        assert!(log.contains(r#"ORDER BY \"staff\".\"salary\" DESC"#), "{log}");
        assert!(log.contains("LIMIT"), "{log}");
    }

    #[tokio::test]
    async fn test_top_by_salary_on_empty_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<staff::Model>::new()])
            .into_connection();

        assert_eq!(find_top_by_salary_descending(&db).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exists_and_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![count_row(3)]])
            .into_connection();

        assert!(!exists_by_id(&db, 9).await.unwrap());
        assert_eq!(count_by_department_id(&db, 1).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = delete_by_id(&db, 5).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert!(executed_sql(db).contains(r#"DELETE FROM \"staff\""#));
    }
}
