//! Greedy settlement matching: reduce net balances to a short list of
//! pairwise transfers by repeatedly pairing the largest outstanding debtor
//! with the largest outstanding creditor.

use log::debug;

use crate::balance::NetBalance;
use crate::constants::MATERIALITY_FLOOR;
use crate::models::Transfer;
use crate::rounding::round2;

/// Matching is pluggable so the greedy sweep can later be swapped for a
/// minimum-transaction-count solver without touching accumulation or the
/// settlement writer.
pub trait SettlementStrategy: Send + Sync {
    fn match_transfers(&self, balances: &NetBalance) -> Vec<Transfer>;
}

/// Largest-outstanding-first two-pointer sweep. Deterministic and O(n log n),
/// but not guaranteed to produce the fewest possible transfers.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMatcher;

struct Outstanding {
    token: String,
    amount: f64,
}

impl SettlementStrategy for GreedyMatcher {
    fn match_transfers(&self, balances: &NetBalance) -> Vec<Transfer> {
        let mut debtors: Vec<Outstanding> = Vec::new();
        let mut creditors: Vec<Outstanding> = Vec::new();

        for (token, balance) in balances.iter() {
            let rounded = round2(balance);
            if rounded.abs() <= MATERIALITY_FLOOR {
                continue; // dust, treated as already settled
            }
            let side = if rounded > 0.0 {
                &mut debtors
            } else {
                &mut creditors
            };
            side.push(Outstanding {
                token: token.to_string(),
                amount: rounded.abs(),
            });
        }

        // Stable sort: equal amounts keep balance encounter order, which
        // keeps the output reproducible for the same bill batch.
        debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let mut transfers = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            let amount = round2(debtors[i].amount.min(creditors[j].amount));

            if amount > MATERIALITY_FLOOR {
                transfers.push(Transfer {
                    from: debtors[i].token.clone(),
                    to: creditors[j].token.clone(),
                    amount,
                });
            }

            debtors[i].amount = round2(debtors[i].amount - amount);
            creditors[j].amount = round2(creditors[j].amount - amount);

            if debtors[i].amount < MATERIALITY_FLOOR {
                i += 1;
            }
            if creditors[j].amount < MATERIALITY_FLOOR {
                j += 1;
            }
        }

        debug!(
            "Matched {} balances into {} transfers",
            balances.len(),
            transfers.len()
        );
        transfers
    }
}
