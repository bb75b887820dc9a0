//! Fixtures shared by the `MockDatabase` based tests

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Value};

use crate::entity::{department, staff};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

pub fn staff_model(id: i64, name: &str, department_id: i64, salary: &str) -> staff::Model {
    staff::Model {
        staff_id: id,
        staff_name: name.to_string(),
        department_id,
        salary: Decimal::from_str(salary).unwrap(),
        created_date: at(1, 9),
        updated_date: at(1, 9),
    }
}

pub fn department_model(id: i64, name: &str) -> department::Model {
    department::Model {
        department_id: id,
        department_name: name.to_string(),
        description: None,
        created_date: at(1, 8),
    }
}

/// Row answering a `PaginatorTrait::count` query on Postgres
pub fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

/// Debug rendering of every statement the mock connection received
///
/// Any service holding the connection must be dropped first.
pub fn executed_sql(db: impl Into<Arc<DatabaseConnection>>) -> String {
    let db = Arc::try_unwrap(db.into()).unwrap_or_else(|_| panic!("mock connection is still shared"));
    format!("{:?}", db.into_transaction_log())
}
