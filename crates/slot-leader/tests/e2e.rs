use ark_ff::{One, PrimeField};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use slot_crypto::{PrivateKey, Scalar};
use slot_leader::{
    generate, pack, unpack, verify, EncodingError, ProofError, ProtocolConfig, ResolutionError,
    Resolver, SlotLeader, SlotLeaderError, StoreError, StoreItem,
};
use std::{sync::Arc, thread};

use fixtures::{generate_test_data, genesis_private_key, init_logging};

const LEADERS: usize = 5;
const SLOTS: usize = 8;

#[test]
fn prove_pack_unpack_verify() {
    init_logging();
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 3);
    let leader = SlotLeader::new(chain.config.clone(), &chain.store);

    for epoch in 1..3u64 {
        for slot in 0..SLOTS as u64 {
            let sk = &chain.leaders[epoch as usize][slot as usize % LEADERS];
            let extra = leader.pack_slot_proof(epoch, slot, sk, rng).unwrap();
            assert!(leader.verify_header_extra(epoch, slot, &extra).unwrap());
        }
    }
}

#[test]
fn genesis_epoch_is_led_by_the_genesis_key() {
    init_logging();
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 1);
    let leader = SlotLeader::new(chain.config.clone(), chain.store.clone());

    let ctx = leader.epoch_context(0).unwrap();
    assert_eq!(ctx.leader_set, chain.config.genesis_leader_set());

    let (message, response) = leader
        .slot_leader_proof(&genesis_private_key(), 0, 3, rng)
        .unwrap();
    assert!(message
        .iter()
        .all(|triple| &triple.public_key == chain.config.genesis_public_key()));
    assert!(leader.verify_slot_proof(0, 3, &response, &message).unwrap());

    // the keys selected during epoch 0 only lead from epoch 1 on
    assert!(matches!(
        leader
            .slot_leader_proof(&chain.leaders[1][0], 0, 3, rng)
            .unwrap_err(),
        SlotLeaderError::Proof(ProofError::InvalidIndex)
    ));
}

#[test]
fn mainnet_genesis_set() {
    let config = ProtocolConfig::mainnet().unwrap();
    let set = config.genesis_leader_set();
    assert_eq!(set.len(), 50);
    assert!(set.iter().all(|pk| pk.is_valid()));
    assert_eq!(genesis_private_key().to_public(), set[0]);
}

#[test]
fn proofs_are_bound_to_their_slot() {
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 2);
    let leader = SlotLeader::new(chain.config.clone(), &chain.store);

    let sk = &chain.leaders[1][2];
    let (message, response) = leader.slot_leader_proof(sk, 1, 5, rng).unwrap();
    for slot in 0..SLOTS as u64 {
        let valid = leader.verify_slot_proof(1, slot, &response, &message).unwrap();
        assert_eq!(valid, slot == 5, "slot {}", slot);
    }
}

#[test]
fn proofs_are_bound_to_their_epoch() {
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 3);
    let leader = SlotLeader::new(chain.config.clone(), &chain.store);

    let (message, response) = leader
        .slot_leader_proof(&chain.leaders[1][0], 1, 0, rng)
        .unwrap();
    assert!(leader.verify_slot_proof(1, 0, &response, &message).unwrap());
    // epoch 2 has other leaders, so the keys of the message do not match
    assert!(!leader.verify_slot_proof(2, 0, &response, &message).unwrap());

    // same leaders, different beacon
    let mut store = chain.store.clone();
    store.insert_random_beacon(1, &Scalar::from(1234u64));
    let replayed = SlotLeader::new(chain.config.clone(), store);
    assert!(!replayed.verify_slot_proof(1, 0, &response, &message).unwrap());
}

#[test]
fn every_index_produces_an_accepted_proof() {
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 2);
    let resolver = Resolver::new(chain.config.clone(), &chain.store);
    let ctx = resolver.resolve(1).unwrap();

    for sk in &chain.leaders[1] {
        let (message, response) = generate(sk, 4, &ctx, rng).unwrap();
        assert!(verify(&response, &message, 4, &ctx).unwrap());
        // the message is identical in shape whoever proves
        assert!(message
            .iter()
            .zip(&ctx.leader_set)
            .all(|(triple, pk)| &triple.public_key == pk));
    }
}

#[test]
fn challenges_do_not_reveal_the_prover() {
    let rng = &mut XorShiftRng::seed_from_u64(0x5eed);
    let chain = generate_test_data(4, 2, 2);
    let ctx = Resolver::new(chain.config.clone(), &chain.store)
        .resolve(1)
        .unwrap();
    let real = 1;
    let sk = &chain.leaders[1][real];

    // where the largest challenge lands should not depend on who proves
    let rounds = 200;
    let mut largest = [0usize; 4];
    for _ in 0..rounds {
        let (_, response) = generate(sk, 0, &ctx, rng).unwrap();
        let (index, _) = response
            .challenges
            .iter()
            .map(|e| e.into_bigint())
            .enumerate()
            .max_by(|a, b| a.1.cmp(&b.1))
            .unwrap();
        largest[index] += 1;
    }
    for count in largest.iter() {
        assert!(*count > 20 && *count < 90, "{:?}", largest);
    }
}

#[test]
fn tampered_header_extra_is_rejected() {
    let rng = &mut XorShiftRng::seed_from_u64(7);
    let chain = generate_test_data(3, SLOTS, 2);
    let leader = SlotLeader::new(chain.config.clone(), &chain.store);
    let extra = leader
        .pack_slot_proof(1, 2, &chain.leaders[1][1], rng)
        .unwrap();

    for _ in 0..50 {
        let mut bad = extra.clone();
        let at = rng.gen_range(0..bad.len());
        bad[at] ^= 1 << rng.gen_range(0..8);
        match leader.verify_header_extra(1, 2, &bad) {
            Ok(valid) => assert!(!valid, "flipped byte {} was accepted", at),
            Err(SlotLeaderError::Encoding(_)) | Err(SlotLeaderError::Proof(_)) => {}
            Err(err) => panic!("unexpected error: {}", err),
        }
    }

    // structured tampering is always a clean rejection
    let (mut response, message) = unpack(&extra).unwrap();
    response.responses[0] += Scalar::one();
    let bad = pack(&response, &message).unwrap();
    assert!(!leader.verify_header_extra(1, 2, &bad).unwrap());
}

#[test]
fn length_integrity() {
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 2);
    let leader = SlotLeader::new(chain.config.clone(), &chain.store);
    let (message, mut response) = leader
        .slot_leader_proof(&chain.leaders[1][0], 1, 0, rng)
        .unwrap();

    // a proof for a smaller leader set
    let extra = pack(
        &slot_leader::ProofResponse {
            challenges: response.challenges[..3].to_vec(),
            responses: response.responses[..3].to_vec(),
        },
        &message[..3],
    )
    .unwrap();
    assert!(matches!(
        leader.verify_header_extra(1, 0, &extra).unwrap_err(),
        SlotLeaderError::Proof(ProofError::LengthMismatch { .. })
    ));

    assert!(matches!(
        leader
            .verify_slot_proof(1, SLOTS as u64, &response, &message)
            .unwrap_err(),
        SlotLeaderError::Proof(ProofError::SlotOutOfRange { .. })
    ));

    response.responses.pop();
    assert!(matches!(
        pack(&response, &message).unwrap_err(),
        EncodingError::Layout(_)
    ));
    assert!(matches!(
        leader
            .verify_slot_proof(1, 0, &response, &message)
            .unwrap_err(),
        SlotLeaderError::Proof(ProofError::LengthMismatch { .. })
    ));
}

#[test]
fn missing_and_corrupt_epoch_data() {
    let rng = &mut rand::thread_rng();
    let chain = generate_test_data(LEADERS, SLOTS, 2);

    let leader = SlotLeader::new(chain.config.clone(), &chain.store);
    let err = leader
        .slot_leader_proof(&chain.leaders[1][0], 2, 0, rng)
        .unwrap_err();
    assert!(matches!(
        err,
        SlotLeaderError::Resolution(ResolutionError::Store(StoreError::NotFound {
            epoch: 2,
            item: StoreItem::RandomBeacon
        }))
    ));

    let mut store = chain.store.clone();
    store.insert_raw(1, StoreItem::CommitmentRandomizers, vec![0xc1, 0x00]);
    let leader = SlotLeader::new(chain.config.clone(), store);
    assert!(matches!(
        leader.epoch_context(1).unwrap_err(),
        SlotLeaderError::Resolution(ResolutionError::Store(StoreError::Corrupt { .. }))
    ));

    // a store built for a larger leader set does not fit the configuration
    let config = ProtocolConfig::new(LEADERS - 1, SLOTS, &chain.config.genesis_public_key().to_hex())
        .unwrap();
    let leader = SlotLeader::new(config, &chain.store);
    assert!(matches!(
        leader.epoch_context(1).unwrap_err(),
        SlotLeaderError::Resolution(ResolutionError::LeaderSetLength { .. })
    ));
}

#[test]
fn concurrent_provers_and_verifiers() {
    init_logging();
    let chain = generate_test_data(LEADERS, SLOTS, 3);
    let leaders = Arc::new(chain.leaders);
    let slot_leader = Arc::new(SlotLeader::new(chain.config, chain.store).with_cache(4));

    let handles = (0..4)
        .map(|t| {
            let slot_leader = slot_leader.clone();
            let leaders = leaders.clone();
            thread::spawn(move || {
                let rng = &mut rand::thread_rng();
                for epoch in 1..3u64 {
                    let sk: &PrivateKey = &leaders[epoch as usize][t % LEADERS];
                    let slot = (t % SLOTS) as u64;
                    let extra = slot_leader.pack_slot_proof(epoch, slot, sk, rng).unwrap();
                    assert!(slot_leader.verify_header_extra(epoch, slot, &extra).unwrap());
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }
}
