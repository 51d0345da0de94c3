//! Property-based tests for content hashing.
//!
//! Hashes must be pure functions of the structural content: the same
//! experiment captured twice, with different generated IDs, timestamps,
//! and user metadata, hashes identically.

use proptest::prelude::*;
use qprov_model::{Circuit, Counts, Execution, GateOp, Hardware, Metadata, Record};

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        ("[a-z]{1,4}", 0_u32..8).prop_map(|(name, q)| GateOp::new(name, [q])),
        ("[a-z]{1,4}", 0_u32..8, 0_u32..8).prop_map(|(name, a, b)| GateOp::new(name, [a, b])),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<GateOp>> {
    prop::collection::vec(arb_gate_op(), 0..=20)
}

fn arb_counts() -> impl Strategy<Value = Counts> {
    prop::collection::btree_map("[01]{2,4}", 1_u64..4096, 1..=8)
        .prop_map(|raw| Counts::from_pairs(raw))
}

proptest! {
    /// The circuit hash depends only on register sizes and the gate
    /// sequence; name and depth never participate.
    #[test]
    fn test_circuit_hash_ignores_name_and_depth(
        ops in arb_ops(),
        num_qubits in 1_u32..16,
        num_clbits in 0_u32..16,
        depth_a in 0_u32..100,
        depth_b in 0_u32..100,
        name in prop::option::of("[a-z_]{1,12}"),
    ) {
        let a = Circuit::from_ops(None, num_qubits, num_clbits, depth_a, &ops);
        let b = Circuit::from_ops(name, num_qubits, num_clbits, depth_b, &ops);
        prop_assert_eq!(a.hash, b.hash);
    }

    /// Hashing the same gate sequence twice is deterministic.
    #[test]
    fn test_circuit_hash_is_deterministic(
        ops in arb_ops(),
        num_qubits in 1_u32..16,
        num_clbits in 0_u32..16,
    ) {
        let first = Circuit::ops_hash(num_qubits, num_clbits, &ops);
        let second = Circuit::ops_hash(num_qubits, num_clbits, &ops);
        prop_assert_eq!(first, second);
    }

    /// Two independently built records of the same experiment share a
    /// content hash, whatever IDs, timestamps, and metadata they carry.
    #[test]
    fn test_record_content_hash_ignores_identity(
        ops in arb_ops(),
        shots in 1_u32..100_000,
        counts in arb_counts(),
        name in "[a-z ]{1,20}",
    ) {
        let build = || {
            Record::builder()
                .circuit(Circuit::from_ops(None, 4, 4, 5, &ops))
                .hardware(Hardware::new("IBM Quantum", "ibm_brisbane", 127))
                .execution(Execution::new(shots))
                .result(qprov_model::ExperimentResult::from_counts(counts.clone()))
                .build()
        };

        let a = build();
        let mut b = build();
        b.metadata = Metadata::named(&name);
        b.created_at = a.created_at + chrono::Duration::hours(3);

        prop_assert_ne!(&a.id, &b.id);
        prop_assert_eq!(a.content_hash(), b.content_hash());
    }

    /// Changing the shot count changes the record hash.
    #[test]
    fn test_record_content_hash_tracks_execution(
        shots_a in 1_u32..100_000,
        shots_b in 1_u32..100_000,
    ) {
        prop_assume!(shots_a != shots_b);
        let a = Record::builder().execution(Execution::new(shots_a)).build();
        let b = Record::builder().execution(Execution::new(shots_b)).build();
        prop_assert_ne!(a.content_hash(), b.content_hash());
    }
}
