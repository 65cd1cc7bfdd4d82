//! Property and concurrency tests for bounded-load selection.

use corelib::{HashRing, RingConfig};
use proptest::prelude::*;
use std::collections::HashMap;

fn ring(hosts: usize, replicas: usize, factor: f64) -> HashRing {
    let ring = HashRing::with_config(RingConfig {
        replicas,
        load_bound_factor: factor,
        ..RingConfig::default()
    })
    .unwrap();
    for i in 0..hosts {
        ring.register_host(&format!("host-{i}")).unwrap();
    }
    ring
}

#[derive(Debug, Clone)]
enum Op {
    Acquire(String),
    Release(usize),
    Inject(usize, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => "[a-z0-9]{1,8}".prop_map(Op::Acquire),
        2 => any::<usize>().prop_map(Op::Release),
        1 => (any::<usize>(), -50i64..50).prop_map(|(h, l)| Op::Inject(h, l)),
    ]
}

proptest! {
    /// Property: with loads driven only by get_key_least + inc, no host
    /// ever exceeds max_load.
    #[test]
    fn prop_loads_stay_within_bound(
        hosts in 1usize..8,
        replicas in 1usize..20,
        factor in 0.0f64..2.0,
        keys in prop::collection::vec("[a-z0-9]{1,6}", 1..200),
    ) {
        let ring = ring(hosts, replicas, factor);

        for key in &keys {
            let host = ring.get_key_least(key).unwrap();
            ring.inc(&host);

            let max = ring.max_load();
            for (host, load) in ring.loads() {
                prop_assert!(load <= max, "{} carries {} > {}", host, load, max);
            }
        }
        prop_assert_eq!(ring.total_load(), keys.len() as i64);
    }

    /// Property: the bounded scan always finds a host, whatever the loads.
    #[test]
    fn prop_bounded_selection_terminates(
        hosts in 1usize..6,
        replicas in 1usize..12,
        factor in 0.0f64..1.0,
        ops in prop::collection::vec(op(), 1..150),
    ) {
        let ring = ring(hosts, replicas, factor);
        let names = ring.hosts();
        let mut held: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Acquire(key) => {
                    let host = ring.get_key_least(&key);
                    prop_assert!(host.is_ok(), "no host selected for {}", key);
                    let host = host.unwrap();
                    ring.inc(&host);
                    held.push(host);
                }
                Op::Release(i) => {
                    if !held.is_empty() {
                        let host = held.swap_remove(i % held.len());
                        ring.done(&host);
                    }
                }
                Op::Inject(i, load) => {
                    ring.update_load(&names[i % names.len()], load);
                }
            }
        }
    }

    /// Property: the aggregate always equals the sum of per-host loads.
    #[test]
    fn prop_total_matches_sum(
        ops in prop::collection::vec(op(), 1..100),
    ) {
        let ring = ring(3, 5, 0.25);
        let names = ring.hosts();

        for op in ops {
            match op {
                Op::Acquire(key) => {
                    let host = ring.get_key_least(&key).unwrap();
                    ring.inc(&host);
                }
                Op::Release(i) => ring.done(&names[i % names.len()]),
                Op::Inject(i, load) => ring.update_load(&names[i % names.len()], load),
            }
            prop_assert_eq!(ring.total_load(), ring.loads().values().sum::<i64>());
        }
    }

    /// Property: ring length is hosts * replicas after every membership change.
    #[test]
    fn prop_ring_length_invariant(
        replicas in 1usize..16,
        changes in prop::collection::vec((0usize..6, any::<bool>()), 1..40),
    ) {
        let ring = ring(0, replicas, 0.25);

        for (id, add) in changes {
            let name = format!("host-{id}");
            let _ = if add { ring.register_host(&name) } else { ring.unregister_host(&name) };

            let tokens = ring.tokens();
            prop_assert_eq!(tokens.len(), ring.host_count() * replicas);
            prop_assert!(tokens.windows(2).all(|w| w[0].token < w[1].token));

            let mut per_host: HashMap<String, usize> = HashMap::new();
            for vnode in tokens {
                *per_host.entry(vnode.host).or_default() += 1;
            }
            prop_assert!(per_host.values().all(|&n| n == replicas));
        }
    }
}

#[test]
fn test_concurrent_reservations_balance_out() {
    let ring = ring(4, 10, 0.25);

    crossbeam::scope(|s| {
        for t in 0..8 {
            let ring = &ring;
            s.spawn(move |_| {
                for i in 0..500 {
                    let key = format!("worker-{t}-key-{}", i % 17);
                    let host = ring.get_key_least(&key).unwrap();
                    ring.inc(&host);
                    ring.done(&host);

                    let guard = ring.reserve(&key).unwrap();
                    assert!(ring.contains_host(guard.host()));
                }
            });
        }
    })
    .unwrap();

    assert_eq!(ring.total_load(), 0);
    assert!(ring.loads().values().all(|&load| load == 0));
}

#[test]
fn test_concurrent_membership_and_lookups() {
    let ring = ring(2, 10, 0.25);

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for i in 0..200 {
                let name = format!("churn-{}", i % 5);
                if ring.register_host(&name).is_err() {
                    ring.unregister_host(&name).unwrap();
                }
            }
        });
        for _ in 0..4 {
            s.spawn(|_| {
                for i in 0..1000 {
                    let key = format!("k{i}");
                    assert!(ring.get_key(&key).is_ok());
                    assert!(ring.get_key_least(&key).is_ok());
                }
            });
        }
    })
    .unwrap();

    assert_eq!(ring.token_count(), ring.host_count() * 10);
    assert_eq!(ring.total_load(), 0);
}
