#![allow(dead_code)]

use model::core::{
    data_type::DataType,
    schema::{SlotDescriptor, TupleDescriptor},
};

pub mod integration;
pub mod utils;

// Slot ids of the `orders` index used across the integration tests.
const ORDER_ID: u32 = 10;
const CUSTOMER: u32 = 11;
const STATUS: u32 = 12;
const TOTAL: u32 = 13;
const CREATED_AT: u32 = 14;
const COUNTRY: u32 = 15;

/// Tuple backing the `orders` search index.
pub fn orders_tuple() -> TupleDescriptor {
    TupleDescriptor::new(
        1u32,
        vec![
            SlotDescriptor::new(ORDER_ID, "order_id", DataType::Long),
            SlotDescriptor::new(CUSTOMER, "customer", DataType::VarChar),
            SlotDescriptor::new(STATUS, "status", DataType::Char),
            SlotDescriptor::new(TOTAL, "total", DataType::Decimal),
            SlotDescriptor::new(CREATED_AT, "created_at", DataType::Date),
            SlotDescriptor::new(COUNTRY, "country", DataType::String),
        ],
    )
}
