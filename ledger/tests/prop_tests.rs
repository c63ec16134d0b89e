use proptest::prelude::*;

use votable_ledger::{AccountLedger, Ledger};
use votable_types::{Address, TokenAmount};

#[derive(Clone, Debug)]
enum Op {
    Credit(u8, u64),
    Debit(u8, u64),
    Transfer(u8, u8, u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..5, 0u64..10_000).prop_map(|(h, a)| Op::Credit(h, a)),
        (0u8..5, 0u64..10_000).prop_map(|(h, a)| Op::Debit(h, a)),
        (0u8..5, 0u8..5, 0u64..10_000).prop_map(|(f, t, a)| Op::Transfer(f, t, a)),
    ]
}

fn holder(n: u8) -> Address {
    Address::new([n; 20])
}

fn apply(ledger: &mut impl AccountLedger, op: &Op) {
    // Failures are expected for overdraws; the invariant must hold either way.
    let _ = match *op {
        Op::Credit(h, a) => ledger.credit(&holder(h), TokenAmount::new(a.into())),
        Op::Debit(h, a) => ledger.debit(&holder(h), TokenAmount::new(a.into())),
        Op::Transfer(f, t, a) => ledger.transfer(&holder(f), &holder(t), TokenAmount::new(a.into())),
    };
}

proptest! {
    /// Total supply equals the sum of balances after any sequence of operations.
    #[test]
    fn supply_matches_sum_of_balances(ops in prop::collection::vec(op(), 0..64)) {
        let mut ledger = Ledger::new();
        for op in &ops {
            apply(&mut ledger, op);
            prop_assert!(ledger.is_consistent());
        }
    }

    /// A committed batch produces the same ledger as applying the operations directly.
    #[test]
    fn batch_commit_matches_direct_application(ops in prop::collection::vec(op(), 0..64)) {
        let mut direct = Ledger::new();
        let mut staged = Ledger::new();
        for op in &ops {
            apply(&mut direct, op);
        }
        let mut batch = staged.batch();
        for op in &ops {
            apply(&mut batch, op);
        }
        batch.commit();
        prop_assert_eq!(staged, direct);
    }

    /// A dropped batch leaves the ledger exactly as it was.
    #[test]
    fn dropped_batch_is_a_no_op(seed in prop::collection::vec(op(), 0..16), ops in prop::collection::vec(op(), 0..32)) {
        let mut ledger = Ledger::new();
        for op in &seed {
            apply(&mut ledger, op);
        }
        let before = ledger.clone();
        {
            let mut batch = ledger.batch();
            for op in &ops {
                apply(&mut batch, op);
            }
        }
        prop_assert_eq!(ledger, before);
    }
}
