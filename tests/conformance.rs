//! Both engines against the naive reference, across orders and one-way functions.

use hashchain_pebbler::*;

fn traverse<P: Pebbler>(engine: &mut P) -> Vec<StepOutcome<P::Block>> {
    let total = engine.order().total_rounds();
    (1..=total).map(|r| engine.step_round(r).unwrap()).collect()
}

fn expected<F: OneWayFunction>(f: &F, k: u32, seed: &F::Block) -> Vec<StepOutcome<F::Block>> {
    let order = Order::new(k).unwrap();
    let mut out: Vec<_> = (0..order.build_rounds()).map(|_| StepOutcome::Pending).collect();
    out.extend(naive_reverse(f, order, seed).unwrap().into_iter().map(StepOutcome::Value));
    out
}

#[test]
fn recursive_engine_matches_naive_reference() {
    let seed = derive_seed(b"conformance");
    for k in 0..=8u32 {
        let mut e = PebbleEngine::new(k, seed, &Sha3Owf).unwrap();
        assert_eq!(traverse(&mut e), expected(&Sha3Owf, k, &seed), "order {k}");
        assert_eq!(e.step().unwrap(), StepOutcome::Exhausted);
    }
}

#[test]
fn iterative_engine_matches_naive_reference() {
    let f = KeyedBlake3Owf::new(&[0x42; 32]);
    let seed = Block([0x17; 32]);
    for k in 0..=8u32 {
        let mut e = IterativeEngine::new(k, seed, &f).unwrap();
        assert_eq!(traverse(&mut e), expected(&f, k, &seed), "order {k}");
        assert_eq!(e.step().unwrap(), StepOutcome::Exhausted);
    }
}

#[test]
fn decompositions_are_byte_identical() {
    let f = KeyedBlake3Owf::new(&[7u8; 32]);
    for k in 0..=11u32 {
        let seed = derive_seed(&k.to_le_bytes());
        let rec = traverse(&mut PebbleEngine::new(k, seed, &f).unwrap());
        let flat = traverse(&mut IterativeEngine::new(k, seed, &f).unwrap());
        assert_eq!(rec.len() as u64, Order::new(k).unwrap().total_rounds());
        assert_eq!(rec, flat, "order {k}");
    }
}

#[test]
fn order_two_scenario() {
    let x0 = Block([0u8; 32]);
    let x1 = Sha3Owf.evaluate(&x0).unwrap();
    let x2 = Sha3Owf.evaluate(&x1).unwrap();
    let x3 = Sha3Owf.evaluate(&x2).unwrap();
    let mut e = PebbleEngine::new(2, x0, &Sha3Owf).unwrap();
    let outs: Vec<_> = (0..7).map(|_| e.step().unwrap()).collect();
    assert_eq!(
        outs,
        vec![
            StepOutcome::Pending,
            StepOutcome::Pending,
            StepOutcome::Pending,
            StepOutcome::Value(x3),
            StepOutcome::Value(x2),
            StepOutcome::Value(x1),
            StepOutcome::Value(x0),
        ]
    );
}

#[test]
fn order_zero_scenario() {
    let x0 = Block([0xAB; 32]);
    let f = Metered::new(Sha3Owf);
    let mut e = IterativeEngine::new(0, x0, &f).unwrap();
    assert_eq!(e.step().unwrap(), StepOutcome::Value(x0));
    assert_eq!(e.step().unwrap(), StepOutcome::Exhausted);
    assert_eq!(f.evaluations(), 0);
}

#[test]
fn peak_storage_is_order_plus_one() {
    for k in 0..=10u32 {
        let seed = derive_seed(b"storage");
        let mut rec = PebbleEngine::new(k, seed, &Sha3Owf).unwrap();
        let report = ChainDriver::new(&Sha3Owf).run(&mut rec).unwrap();
        assert_eq!(report.peak_live_blocks, k as usize + 1, "order {k}");

        let mut flat = IterativeEngine::new(k, seed, &Sha3Owf).unwrap();
        let report = ChainDriver::new(&Sha3Owf).run(&mut flat).unwrap();
        assert_eq!(report.peak_live_blocks, k as usize + 1, "order {k}");
    }
}

#[test]
fn evaluations_follow_the_schedule() {
    for k in 0..=10u32 {
        let order = Order::new(k).unwrap();
        let f = Metered::new(Sha3Owf);
        let mut e = PebbleEngine::new(k, Block([1u8; 32]), &f).unwrap();
        let mut build_total = 0u64;
        for r in 1..=order.total_rounds() {
            let before = f.evaluations();
            e.step_round(r).unwrap();
            let spent = f.evaluations() - before;
            if r <= order.build_rounds() {
                assert_eq!(spent, u64::from(advances(k, r).unwrap()), "order {k} round {r}");
                build_total += spent;
            } else {
                assert!(spent <= u64::from(emission_round_cap(k)), "order {k} round {r}: {spent}");
            }
        }
        assert_eq!(build_total, order.build_rounds());
        assert_eq!(u128::from(f.evaluations()), order.traversal_cost(), "order {k}");
    }
}

#[test]
fn iterative_engine_spends_the_same_evaluations() {
    for k in 0..=10u32 {
        let a = Metered::new(Sha3Owf);
        let b = Metered::new(Sha3Owf);
        let mut rec = PebbleEngine::new(k, Block([2u8; 32]), &a).unwrap();
        let mut flat = IterativeEngine::new(k, Block([2u8; 32]), &b).unwrap();
        while !rec.is_exhausted() {
            rec.step().unwrap();
            flat.step().unwrap();
            assert_eq!(a.evaluations(), b.evaluations(), "order {k}");
        }
    }
}

#[test]
fn invalid_orders_are_configuration_errors() {
    assert!(matches!(
        PebbleEngine::new(MAX_ORDER + 1, Block([0u8; 32]), &Sha3Owf),
        Err(PebbleError::Configuration { .. })
    ));
    assert!(matches!(
        IterativeEngine::new(u32::MAX, Block([0u8; 32]), &Sha3Owf),
        Err(PebbleError::Configuration { .. })
    ));
    assert!(matches!(Order::try_from(-4i64), Err(PebbleError::Configuration { order: -4, .. })));
}

#[test]
fn tail_policies_are_consistent() {
    let seed = Block([0u8; 32]);
    let mut lenient = PebbleEngine::new(3, seed, &Sha3Owf).unwrap();
    let mut strict = IterativeEngine::new(3, seed, &Sha3Owf).unwrap().with_policy(TailPolicy::Strict);
    traverse(&mut lenient);
    traverse(&mut strict);
    for _ in 0..3 {
        assert_eq!(lenient.step().unwrap(), StepOutcome::Exhausted);
        assert_eq!(
            strict.step(),
            Err(PebbleError::ProtocolViolation(Violation::AfterExhausted))
        );
    }
}
