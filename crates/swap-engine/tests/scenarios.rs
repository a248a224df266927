//! End-to-end scenarios S1-S6 (spec §8), exercised against the logical
//! clock the whole workspace takes as an explicit `now: u64` parameter
//! rather than wall-clock time.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use swap_engine::*;

fn addr(b: u8) -> Address {
    Address::Evm([b; 20])
}

fn phases() -> TimeLocks {
    construct_time_locks(15, 60, 120, 180, 15, 60, 120).unwrap()
}

fn immutables(hash_lock: Digest32, maker: Address, taker: Address, foreign_order_hash: Digest32) -> Immutables {
    Immutables {
        order_hash: Digest32::keccak(b"order-hash"),
        hash_lock,
        maker,
        taker,
        token_type: TokenId("native".into()),
        amount: 20_000_000,
        safety_deposit: 1_000,
        time_locks: phases(),
        foreign_order_hash,
    }
}

/// S1: happy-path S->E swap, secret relayed from the source escrow to the
/// destination coordinator.
#[test]
fn s1_happy_path_source_to_destination() {
    init_test_tracing();

    let secret = b"working_real_1754151588608";
    let hash_lock = compute_hash_lock(secret);
    let maker = addr(1);
    let taker = addr(2);

    let escrow_s_id = Digest32::keccak(b"escrow-s");
    let order_hash_e = Digest32::keccak(b"order-e");

    let imm_s = immutables(hash_lock, maker, taker, order_hash_e);
    let (mut escrow_s, _) = Escrow::<Principal>::create(escrow_s_id, EscrowSide::Src, imm_s.clone(), 0).unwrap();
    escrow_s
        .deposit(taker, Balance::new(20_000_000), Balance::new(1_000))
        .unwrap();

    let (principal, _safety, withdrawn) = escrow_s.withdraw(taker, secret, 20).unwrap();
    assert_eq!(principal.value(), 20_000_000);
    match &withdrawn {
        SwapEvent::Withdrawn { secret: s, .. } => assert_eq!(s, secret),
        _ => panic!("wrong event"),
    }

    // Off-chain relay.
    let mut coordinator = Coordinator::new(addr(99));
    coordinator
        .coordinate_secret_from_foreign(escrow_s_id, secret.to_vec(), order_hash_e, addr(3), 25)
        .unwrap();

    // Destination-side escrow on Chain-E, mirroring the swap.
    let imm_e = immutables(hash_lock, maker, taker, escrow_s_id);
    let escrow_e_id = Digest32::keccak(b"escrow-e");
    let (mut escrow_e, _) = Escrow::<Principal>::create(escrow_e_id, EscrowSide::Dst, imm_e, 0).unwrap();
    escrow_e
        .deposit(taker, Balance::new(20_000_000), Balance::new(1_000))
        .unwrap();

    // `taker` is the private-withdraw caller on the Dst side (spec §4.2 op 3).
    let (principal, _, _, completed) = coordinator
        .withdraw_with_coordinated_secret(&mut escrow_e, escrow_s_id, taker, 30, "chain-s", "chain-e", 20_000_000)
        .unwrap();
    assert_eq!(principal.value(), 20_000_000);
    match completed {
        SwapEvent::CrossChainSwapCompleted { dst_amount, .. } => assert_eq!(dst_amount, 20_000_000),
        _ => panic!("wrong event"),
    }
}

/// S2: cancellation path — non-taker cancel is rejected before the public
/// cancellation threshold and succeeds after it, refunding the maker.
#[test]
fn s2_cancellation_path() {
    let maker = addr(1);
    let taker = addr(2);
    let hash_lock = Digest32::keccak(b"unused-secret");
    let imm = immutables(hash_lock, maker, taker, Digest32::keccak(b"foreign"));

    let (mut escrow, _) = Escrow::<Principal>::create(Digest32::keccak(b"escrow"), EscrowSide::Src, imm, 0).unwrap();
    escrow
        .deposit(taker, Balance::new(20_000_000), Balance::new(1_000))
        .unwrap();

    let stranger = addr(77);
    let err = escrow.cancel(stranger, 150).unwrap_err();
    assert_eq!(err, SwapError::TimeLockNotExpired);

    let (principal, _, event) = escrow.cancel(stranger, 200).unwrap();
    assert_eq!(principal.value(), 20_000_000);
    match event {
        SwapEvent::Cancelled { to, amount, .. } => {
            assert_eq!(to, maker);
            assert_eq!(amount, 20_000_000);
        }
        _ => panic!("wrong event"),
    }
}

/// S3: a bad secret is rejected and moves no balance.
#[test]
fn s3_bad_secret_moves_no_balance() {
    let maker = addr(1);
    let taker = addr(2);
    let hash_lock = Digest32::keccak(b"right-secret");
    let imm = immutables(hash_lock, maker, taker, Digest32::keccak(b"foreign"));

    let (mut escrow, _) = Escrow::<Principal>::create(Digest32::keccak(b"escrow"), EscrowSide::Src, imm, 0).unwrap();
    escrow
        .deposit(taker, Balance::new(20_000_000), Balance::new(1_000))
        .unwrap();

    let err = escrow.withdraw(taker, b"wrong-secret", 20).unwrap_err();
    assert_eq!(err, SwapError::InvalidSecret);
    assert_eq!(escrow.state(), EscrowState::Funded);
}

/// S4: partial fill with four secrets; the second fill pushes the
/// accumulator past 10_000 bp, which current semantics permits (spec §9
/// open question 1).
#[test]
fn s4_partial_fill_overshoot_is_permitted() {
    let secrets: Vec<&[u8]> = vec![b"s1", b"s2", b"s3", b"s4"];
    let leaves = merkle_leaves(&secrets);
    let root = merkle_root(&leaves);

    let order = Order {
        salt: Digest32::keccak(b"salt"),
        maker: addr(1),
        receiver: addr(2),
        maker_asset: TokenId("asset-a".into()),
        taker_asset: TokenId("asset-b".into()),
        making_amount: 1_000_000,
        taking_amount: 2_000_000,
        maker_traits: Digest32::ZERO,
    };
    let mut partial = PartialFillOrder {
        order,
        merkle_root: root,
        fill_percentage: 0,
        secret_index: 0,
        allow_partial_fills: true,
        total_secrets: 4,
    };

    let proof2 = merkle_proof(&leaves, 1);
    let event = execute_partial_fill(&mut partial, b"s2", &proof2, 1, 2_500, addr(9)).unwrap();
    match event {
        SwapEvent::PartialFillExecuted { fill_amount, .. } => assert_eq!(fill_amount, 250_000),
        _ => panic!("wrong event"),
    }

    let proof1 = merkle_proof(&leaves, 0);
    execute_partial_fill(&mut partial, b"s1", &proof1, 0, 8_000, addr(9)).unwrap();
    assert_eq!(partial.fill_percentage, 10_500);
}

/// S5: checkpoint threshold — 2-of-3 stake-weighted validators accepted,
/// the largest single holder alone rejected.
#[test]
fn s5_checkpoint_threshold() {
    let checkpoint_hash = Digest32::keccak(b"checkpoint");
    let key_a = SigningKey::generate(&mut OsRng);
    let key_b = SigningKey::generate(&mut OsRng);
    let key_c = SigningKey::generate(&mut OsRng);

    let sig = |key: &SigningKey, stake: u64| ValidatorSignature {
        ed25519_sig: key.sign(checkpoint_hash.as_bytes()).to_bytes(),
        public_key: key.verifying_key().to_bytes(),
        stake_weight: stake,
    };
    let unsigned = |key: &SigningKey, stake: u64| ValidatorSignature {
        ed25519_sig: [0u8; 64],
        public_key: key.verifying_key().to_bytes(),
        stake_weight: stake,
    };

    let mut verifier = Verifier::new();

    let two_of_three = Checkpoint {
        checkpoint_hash,
        sequence: 1,
        signatures: vec![sig(&key_a, 4), sig(&key_b, 3), unsigned(&key_c, 3)],
    };
    assert!(verifier.verify_checkpoint(&two_of_three));

    let only_largest = Checkpoint {
        checkpoint_hash,
        sequence: 2,
        signatures: vec![sig(&key_a, 4), unsigned(&key_b, 3), unsigned(&key_c, 3)],
    };
    assert!(!verifier.verify_checkpoint(&only_largest));
}

/// S6: coordinating the same secret twice — second call fails, first-call
/// state is unchanged.
#[test]
fn s6_idempotent_coordinator_rejects_duplicate_secret() {
    let mut coordinator = Coordinator::new(addr(99));
    let foreign_escrow_id = Digest32::keccak(b"escrow-s");
    let local_order_hash = Digest32::keccak(b"order-e");
    let secret = b"shared-secret".to_vec();

    coordinator
        .coordinate_secret_from_foreign(foreign_escrow_id, secret.clone(), local_order_hash, addr(3), 10)
        .unwrap();
    let (before, _) = coordinator.get_coordinated_secret(foreign_escrow_id).unwrap();

    let err = coordinator
        .coordinate_secret_from_foreign(foreign_escrow_id, secret, local_order_hash, addr(4), 999)
        .unwrap_err();
    assert_eq!(err, SwapError::SecretAlreadyCoordinated { foreign_escrow_id });

    let (after, _) = coordinator.get_coordinated_secret(foreign_escrow_id).unwrap();
    assert_eq!(before, after);
}
