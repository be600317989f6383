use crate::model::{AttributeConfig, Order};
use std::collections::HashMap;

/// Code reserved for the empty / missing value of every attribute.
pub const EMPTY_CODE: u32 = 0;

/// Orders resolved against the configured attribute columns.
///
/// Every order gets exactly one code per attribute (row-major), so the search
/// loops compare integers instead of probing string maps. Codes are assigned in
/// first-appearance order per attribute; `0` always means "no value".
#[derive(Debug, Clone)]
pub struct EncodedOrders {
    order_count: usize,
    attribute_count: usize,
    codes: Vec<u32>,
    dictionaries: Vec<Vec<String>>,
}

impl EncodedOrders {
    pub fn encode(orders: &[Order], attributes: &[AttributeConfig]) -> Self {
        let attribute_count = attributes.len();
        let mut codes = Vec::with_capacity(orders.len() * attribute_count);
        let mut dictionaries: Vec<Vec<String>> = vec![vec![String::new()]; attribute_count];
        let mut interners: Vec<HashMap<&str, u32>> = vec![HashMap::new(); attribute_count];

        for order in orders {
            for (a, attr) in attributes.iter().enumerate() {
                let value = order.value(&attr.column);
                if value.is_empty() {
                    codes.push(EMPTY_CODE);
                    continue;
                }
                let dict = &mut dictionaries[a];
                let code = *interners[a].entry(value).or_insert_with(|| {
                    dict.push(value.to_string());
                    (dict.len() - 1) as u32
                });
                codes.push(code);
            }
        }

        Self {
            order_count: orders.len(),
            attribute_count,
            codes,
            dictionaries,
        }
    }

    pub fn len(&self) -> usize {
        self.order_count
    }

    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    pub fn attribute_count(&self) -> usize {
        self.attribute_count
    }

    #[inline(always)]
    pub fn code(&self, order: usize, attribute: usize) -> u32 {
        self.codes[order * self.attribute_count + attribute]
    }

    #[inline(always)]
    pub fn row(&self, order: usize) -> &[u32] {
        let start = order * self.attribute_count;
        &self.codes[start..start + self.attribute_count]
    }

    /// Looks up the code of a value, if it occurs in any order.
    pub fn code_of(&self, attribute: usize, value: &str) -> Option<u32> {
        if value.is_empty() {
            return Some(EMPTY_CODE);
        }
        self.dictionaries[attribute]
            .iter()
            .position(|v| v == value)
            .map(|p| p as u32)
    }

    pub fn value(&self, attribute: usize, code: u32) -> &str {
        &self.dictionaries[attribute][code as usize]
    }

    /// Number of distinct codes for an attribute, including the empty code.
    pub fn cardinality(&self, attribute: usize) -> usize {
        self.dictionaries[attribute].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_first_appearance() {
        let attrs = vec![AttributeConfig::new("Color", 10.0)];
        let orders = vec![
            Order::new("a", 0, [("Color", "Blue")]),
            Order::new("b", 1, [("Color", "Red")]),
            Order::new("c", 2, [("Color", "Blue")]),
            Order::new("d", 3, Vec::<(String, String)>::new()),
        ];
        let enc = EncodedOrders::encode(&orders, &attrs);
        assert_eq!(enc.len(), 4);
        assert_eq!(enc.code(0, 0), 1);
        assert_eq!(enc.code(1, 0), 2);
        assert_eq!(enc.code(2, 0), 1);
        assert_eq!(enc.code(3, 0), EMPTY_CODE);
        assert_eq!(enc.value(0, 2), "Red");
        assert_eq!(enc.cardinality(0), 3);
    }

    #[test]
    fn explicit_empty_string_matches_missing() {
        let attrs = vec![AttributeConfig::new("Color", 10.0)];
        let orders = vec![
            Order::new("a", 0, [("Color", "")]),
            Order::new("b", 1, Vec::<(String, String)>::new()),
        ];
        let enc = EncodedOrders::encode(&orders, &attrs);
        assert_eq!(enc.code(0, 0), enc.code(1, 0));
    }
}
