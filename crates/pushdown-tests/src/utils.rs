#![allow(dead_code)]

use super::{COUNTRY, CREATED_AT, CUSTOMER, ORDER_ID, STATUS, TOTAL, orders_tuple};
use expression_engine::ConstantFolder;
use model::{
    core::data_type::DataType,
    execution::expr::{BinaryOp, Expr},
};
use pushdown::{
    ConjunctPartition, DisjunctExtractor, PushdownSettings, partition_conjuncts, split_conjuncts,
};

/// A full-text query document, as the planner hands it to the match function.
pub const MATCH_QUERY: &str = r#"{"match": {"customer": "acme"}}"#;

pub fn order_id() -> Expr {
    Expr::labeled_slot(ORDER_ID, "order_id", DataType::Long)
}

pub fn customer() -> Expr {
    Expr::labeled_slot(CUSTOMER, "customer", DataType::VarChar)
}

pub fn status() -> Expr {
    Expr::labeled_slot(STATUS, "status", DataType::Char)
}

pub fn total() -> Expr {
    Expr::labeled_slot(TOTAL, "total", DataType::Decimal)
}

pub fn created_at() -> Expr {
    Expr::labeled_slot(CREATED_AT, "created_at", DataType::Date)
}

pub fn country() -> Expr {
    Expr::labeled_slot(COUNTRY, "country", DataType::String)
}

pub fn cmp(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

pub fn strings(values: &[&str]) -> Vec<Expr> {
    values.iter().map(|v| Expr::literal(*v)).collect()
}

pub fn esquery(query: &str) -> Expr {
    Expr::function(
        "esquery",
        vec![customer(), Expr::literal(query)],
        DataType::Boolean,
    )
}

/// Split `where_clause` into conjuncts and offer each to the `orders` index.
pub fn push_down(where_clause: &Expr, settings: &PushdownSettings) -> ConjunctPartition {
    let tuple = orders_tuple();
    let folder = ConstantFolder::new();
    let extractor = DisjunctExtractor::new(&tuple, &folder, settings);
    partition_conjuncts(split_conjuncts(where_clause), &extractor)
}
