#![allow(dead_code)]

use changeover::{AttributeConfig, Order};

/// Orders whose values follow `columns`, ids `O1`, `O2`, ...
pub fn orders(columns: &[&str], rows: &[&[&str]]) -> Vec<Order> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            Order::new(
                format!("O{}", i + 1),
                i,
                columns.iter().copied().zip(row.iter().copied()),
            )
        })
        .collect()
}

pub fn attr(column: &str, minutes: f64) -> AttributeConfig {
    AttributeConfig::new(column, minutes)
}

pub fn grouped(column: &str, minutes: f64, group: &str) -> AttributeConfig {
    AttributeConfig::new(column, minutes).with_group(group)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
