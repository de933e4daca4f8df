//! Balance accumulation: reduce a batch of bills to one signed net balance
//! per participant token. Positive means the participant consumed more than
//! they fronted (net debtor); negative means they are owed money.

use std::collections::HashMap;

use log::debug;

use crate::error::BillsplitError;
use crate::models::Bill;
use crate::rounding::round2;

/// Net balances keyed by participant token, preserving first-seen order.
/// The matcher sorts by amount with a stable sort, so ties fall back to
/// this encounter order; that makes the transfer list reproducible for the
/// same bill batch, which a plain `HashMap` iteration would not be.
#[derive(Clone, Debug, Default)]
pub struct NetBalance {
    order: Vec<String>,
    amounts: HashMap<String, f64>,
}

impl NetBalance {
    pub fn new() -> Self {
        NetBalance::default()
    }

    /// Register a token with a zero balance if it has not been seen yet.
    pub fn touch(&mut self, token: &str) {
        if !self.amounts.contains_key(token) {
            self.order.push(token.to_string());
            self.amounts.insert(token.to_string(), 0.0);
        }
    }

    pub fn add(&mut self, token: &str, amount: f64) {
        self.touch(token);
        if let Some(balance) = self.amounts.get_mut(token) {
            *balance += amount;
        }
    }

    pub fn get(&self, token: &str) -> f64 {
        self.amounts.get(token).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(token, balance)` in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.order
            .iter()
            .map(|token| (token.as_str(), self.amounts[token]))
    }
}

/// Reduce bills to net balances.
///
/// Per item: the effective amount (tax and service added, discount
/// subtracted, then rounded) is debited from the payer in full, while each
/// consumer is credited the rounded equal share. On splits that do not
/// divide evenly the credits sum to slightly less than the debit, leaving
/// up to one cent per consumer unassigned. That residue matches what every
/// previously written settlement contains and is deliberately not closed
/// here (closing it would mean crediting `share * n` adjusted on the last
/// consumer, a versioned change to historical output).
pub fn accumulate(bills: &[Bill]) -> Result<NetBalance, BillsplitError> {
    validate_bills(bills)?;

    let mut balances = NetBalance::new();

    for bill in bills {
        // Register every referenced token first so participants whose
        // balance nets to zero still appear.
        for item in &bill.items {
            for consumer in &item.consumers {
                balances.touch(consumer);
            }
            balances.touch(&item.payer);
        }

        for item in &bill.items {
            let effective = round2(
                item.amount * (1.0 + bill.tax_rate + bill.service_rate - bill.discount_rate),
            );
            balances.add(&item.payer, -effective);

            let share = round2(effective / item.consumers.len() as f64);
            for consumer in &item.consumers {
                balances.add(consumer, share);
            }
        }
    }

    debug!("Accumulated balances over {} bills", bills.len());
    Ok(balances)
}

/// Reject malformed input before any balance is touched.
pub fn validate_bills(bills: &[Bill]) -> Result<(), BillsplitError> {
    for bill in bills {
        if bill.items.is_empty() {
            return Err(BillsplitError::EmptyBill);
        }
        for item in &bill.items {
            if item.consumers.is_empty() {
                return Err(BillsplitError::ItemWithoutConsumers(item.name.clone()));
            }
            if item.amount <= 0.0 {
                return Err(BillsplitError::NonPositiveAmount(
                    item.name.clone(),
                    item.amount,
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use chrono::Utc;

    fn bill(items: Vec<Item>, tax: f64, service: f64, discount: f64) -> Bill {
        Bill {
            id: "b1".to_string(),
            group_id: "g1".to_string(),
            items,
            tax_rate: tax,
            service_rate: service,
            discount_rate: discount,
            settled: false,
            created_at: Utc::now(),
        }
    }

    fn item(amount: f64, consumers: &[&str], payer: &str) -> Item {
        Item {
            name: "item".to_string(),
            amount,
            consumers: consumers.iter().map(|s| s.to_string()).collect(),
            payer: payer.to_string(),
        }
    }

    #[test]
    fn single_item_single_consumer() {
        let bills = vec![bill(vec![item(10000.0, &["A"], "B")], 0.0, 0.0, 0.0)];
        let balances = accumulate(&bills).unwrap();
        assert_eq!(balances.get("A"), 10000.0);
        assert_eq!(balances.get("B"), -10000.0);
    }

    #[test]
    fn rates_apply_uniformly() {
        let bills = vec![bill(vec![item(10000.0, &["A"], "B")], 0.1, 0.05, 0.02)];
        let balances = accumulate(&bills).unwrap();
        assert_eq!(balances.get("A"), 11300.0);
        assert_eq!(balances.get("B"), -11300.0);
    }

    #[test]
    fn payer_in_consumers_self_nets() {
        let bills = vec![bill(vec![item(100.0, &["A", "B"], "A")], 0.0, 0.0, 0.0)];
        let balances = accumulate(&bills).unwrap();
        assert_eq!(balances.get("A"), -50.0);
        assert_eq!(balances.get("B"), 50.0);
    }

    #[test]
    fn non_divisible_split_leaves_residue() {
        let bills = vec![bill(
            vec![item(10000.0, &["A", "B", "C"], "D")],
            0.0,
            0.0,
            0.0,
        )];
        let balances = accumulate(&bills).unwrap();
        assert_eq!(balances.get("A"), 3333.33);
        assert_eq!(balances.get("B"), 3333.33);
        assert_eq!(balances.get("C"), 3333.33);
        assert_eq!(balances.get("D"), -10000.0);
        // 0.01 is absorbed into no one's balance.
        let sum: f64 = balances.iter().map(|(_, b)| b).sum();
        assert!((sum + 0.01).abs() < 1e-9);
    }

    #[test]
    fn all_referenced_tokens_are_registered() {
        let bills = vec![bill(
            vec![item(50.0, &["A"], "B"), item(50.0, &["B"], "A")],
            0.0,
            0.0,
            0.0,
        )];
        let balances = accumulate(&bills).unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("A"), 0.0);
        assert_eq!(balances.get("B"), 0.0);
    }

    #[test]
    fn encounter_order_is_first_seen() {
        let bills = vec![bill(
            vec![item(10.0, &["C", "A"], "B"), item(10.0, &["D"], "A")],
            0.0,
            0.0,
            0.0,
        )];
        let balances = accumulate(&bills).unwrap();
        let order: Vec<&str> = balances.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn empty_batch_yields_empty_balances() {
        let balances = accumulate(&[]).unwrap();
        assert!(balances.is_empty());
    }

    #[test]
    fn item_without_consumers_is_rejected() {
        let bills = vec![bill(vec![item(10.0, &[], "A")], 0.0, 0.0, 0.0)];
        assert!(matches!(
            accumulate(&bills),
            Err(BillsplitError::ItemWithoutConsumers(_))
        ));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let bills = vec![bill(vec![item(0.0, &["A"], "B")], 0.0, 0.0, 0.0)];
        assert!(matches!(
            accumulate(&bills),
            Err(BillsplitError::NonPositiveAmount(_, _))
        ));
    }

    #[test]
    fn empty_bill_is_rejected() {
        let bills = vec![bill(vec![], 0.0, 0.0, 0.0)];
        assert!(matches!(accumulate(&bills), Err(BillsplitError::EmptyBill)));
    }
}
