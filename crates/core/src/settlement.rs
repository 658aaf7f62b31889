//! Settlement arithmetic: activity totals and per-member balance aggregation.
//!
//! Sender amounts are authoritative. An activity's total is always the sum
//! of its sender shares (what the members owe), never the sum of what payers
//! fronted; the report aggregates both sides per member.

use serde::Serialize;

use crate::types::DbId;

/// One sender or payer row reduced to the fields the arithmetic needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry {
    pub user_id: DbId,
    pub amount: f64,
}

/// Net position of one member across a set of activities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemberBalance {
    pub user_id: DbId,
    /// Total owed as a sender.
    pub amount_spent: f64,
    /// Total fronted as a payer.
    pub amount_paid: f64,
}

/// Compute an activity's total amount from its sender shares.
pub fn total_amount<I>(sender_amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    sender_amounts.into_iter().sum()
}

/// Aggregate spent/paid per member, preserving the member order given.
///
/// Members with no matching rows get zero balances; rows for users outside
/// `member_user_ids` are ignored (they belong to other report pages).
pub fn aggregate_balances(
    member_user_ids: &[DbId],
    senders: &[LedgerEntry],
    payers: &[LedgerEntry],
) -> Vec<MemberBalance> {
    member_user_ids
        .iter()
        .map(|&user_id| MemberBalance {
            user_id,
            amount_spent: sum_for(user_id, senders),
            amount_paid: sum_for(user_id, payers),
        })
        .collect()
}

fn sum_for(user_id: DbId, entries: &[LedgerEntry]) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.user_id == user_id)
        .map(|entry| entry.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: DbId, amount: f64) -> LedgerEntry {
        LedgerEntry { user_id, amount }
    }

    #[test]
    fn total_is_the_sum_of_sender_shares() {
        assert_eq!(total_amount([40.0, 35.5, 24.5]), 100.0);
        assert_eq!(total_amount([]), 0.0);
        assert_eq!(total_amount([0.0, 0.0]), 0.0);
    }

    #[test]
    fn one_payer_covering_one_sender() {
        // Group with members [1, 2]; activity with senders=[{2, 100}],
        // payers=[{1, 100}]. Member 2 owes 100, member 1 fronted 100.
        let balances = aggregate_balances(
            &[1, 2],
            &[entry(2, 100.0)],
            &[entry(1, 100.0)],
        );
        assert_eq!(
            balances,
            vec![
                MemberBalance { user_id: 1, amount_spent: 0.0, amount_paid: 100.0 },
                MemberBalance { user_id: 2, amount_spent: 100.0, amount_paid: 0.0 },
            ]
        );
    }

    #[test]
    fn balances_accumulate_across_activities() {
        let senders = [entry(1, 10.0), entry(2, 30.0), entry(1, 5.0)];
        let payers = [entry(1, 40.0), entry(1, 5.0)];
        let balances = aggregate_balances(&[1, 2], &senders, &payers);
        assert_eq!(balances[0].amount_spent, 15.0);
        assert_eq!(balances[0].amount_paid, 45.0);
        assert_eq!(balances[1].amount_spent, 30.0);
        assert_eq!(balances[1].amount_paid, 0.0);
    }

    #[test]
    fn inactive_members_get_zero_balances() {
        let balances = aggregate_balances(&[7], &[entry(1, 50.0)], &[]);
        assert_eq!(
            balances,
            vec![MemberBalance { user_id: 7, amount_spent: 0.0, amount_paid: 0.0 }]
        );
    }

    #[test]
    fn rows_outside_the_member_page_are_ignored() {
        let balances = aggregate_balances(
            &[1],
            &[entry(1, 20.0), entry(99, 80.0)],
            &[entry(99, 100.0)],
        );
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].amount_spent, 20.0);
        assert_eq!(balances[0].amount_paid, 0.0);
    }

    #[test]
    fn member_order_is_preserved() {
        let balances = aggregate_balances(&[3, 1, 2], &[], &[]);
        let ids: Vec<DbId> = balances.iter().map(|b| b.user_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
