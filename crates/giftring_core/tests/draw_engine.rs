use giftring_core::{draw, DrawError, Participant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn roster(names: &[&str]) -> Vec<Participant> {
    names
        .iter()
        .map(|name| Participant::new(*name, "000"))
        .collect()
}

/// Follows the assignment chain from the first participant and returns how
/// many hops it takes to get back. A single full cycle takes exactly `n`.
fn cycle_length(participants: &[Participant], assignments: &HashMap<String, String>) -> usize {
    let slug_by_name: HashMap<&str, &str> = participants
        .iter()
        .map(|p| (p.name.as_str(), p.slug.as_str()))
        .collect();

    let start = participants[0].slug.as_str();
    let mut current = start;
    let mut hops = 0;
    loop {
        let next_name = assignments.get(current).expect("missing assignment");
        current = slug_by_name[next_name.as_str()];
        hops += 1;
        if current == start || hops > participants.len() {
            return hops;
        }
    }
}

#[test]
fn draw_rejects_fewer_than_two_participants() {
    let mut rng = StdRng::seed_from_u64(1);

    let err = draw(&[], &mut rng).unwrap_err();
    assert_eq!(err, DrawError::InsufficientParticipants { found: 0 });

    let err = draw(&roster(&["Solo"]), &mut rng).unwrap_err();
    assert_eq!(err, DrawError::InsufficientParticipants { found: 1 });
}

#[test]
fn two_participants_swap_deterministically() {
    let participants = roster(&["Alice", "Bob"]);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignments = draw(&participants, &mut rng).unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments["alice"], "Bob");
        assert_eq!(assignments["bob"], "Alice");
    }
}

#[test]
fn randomized_trials_never_self_assign_and_stay_bijective() {
    let mut rng = StdRng::seed_from_u64(42);

    for trial in 0..10_000u64 {
        let n = 3 + (trial % 48) as usize;
        let names: Vec<String> = (0..n).map(|i| format!("Person {i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let participants = roster(&name_refs);

        let assignments = draw(&participants, &mut rng).unwrap();
        assert_eq!(assignments.len(), n);

        for participant in &participants {
            let assigned = &assignments[&participant.slug];
            assert_ne!(assigned, &participant.name, "self-assignment at n={n}");
        }

        // Every roster name appears as a value exactly once.
        for participant in &participants {
            let count = assignments
                .values()
                .filter(|name| **name == participant.name)
                .count();
            assert_eq!(count, 1, "name assigned {count} times at n={n}");
        }
    }
}

#[test]
fn three_participants_always_form_one_of_the_two_three_cycles() {
    let participants = roster(&["Alice", "Bob", "Carol"]);
    let mut rng = StdRng::seed_from_u64(7);
    let mut saw_forward = false;
    let mut saw_backward = false;

    for _ in 0..1_000 {
        let assignments = draw(&participants, &mut rng).unwrap();

        let forward = assignments["alice"] == "Bob"
            && assignments["bob"] == "Carol"
            && assignments["carol"] == "Alice";
        let backward = assignments["alice"] == "Carol"
            && assignments["carol"] == "Bob"
            && assignments["bob"] == "Alice";

        assert!(
            forward || backward,
            "not a single 3-cycle: {assignments:?}"
        );
        saw_forward |= forward;
        saw_backward |= backward;
    }

    // Both rotations should occur over 1000 trials.
    assert!(saw_forward && saw_backward);
}

#[test]
fn composite_roster_sizes_still_produce_one_full_cycle() {
    let mut rng = StdRng::seed_from_u64(99);

    for n in [4usize, 6, 8, 9, 10, 12, 15, 16] {
        let names: Vec<String> = (0..n).map(|i| format!("Member {i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let participants = roster(&name_refs);

        for _ in 0..200 {
            let assignments: HashMap<String, String> = draw(&participants, &mut rng)
                .unwrap()
                .into_iter()
                .collect();
            assert_eq!(
                cycle_length(&participants, &assignments),
                n,
                "sub-cycle detected at n={n}"
            );
        }
    }
}

#[test]
fn namesake_rosters_draw_without_exhausting_retries() {
    // Two participants may share a display name as long as their slugs
    // differ; every rotation then assigns the shared name somewhere, which
    // must not be mistaken for a self-assignment.
    let participants = vec![
        Participant::with_slug("Ana", "111", "ana"),
        Participant::with_slug("Ana", "222", "ana-2"),
        Participant::with_slug("Bob", "333", "bob"),
    ];
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..500 {
        let assignments = draw(&participants, &mut rng).unwrap();
        assert_eq!(assignments.len(), 3);
        assert_eq!(
            assignments.values().filter(|name| *name == "Ana").count(),
            2
        );
        assert_eq!(
            assignments.values().filter(|name| *name == "Bob").count(),
            1
        );
    }
}

#[test]
fn same_seed_reproduces_the_same_assignments() {
    let participants = roster(&["Ana", "Bea", "Caio", "Duda", "Edu"]);

    let first = draw(&participants, &mut StdRng::seed_from_u64(1234)).unwrap();
    let second = draw(&participants, &mut StdRng::seed_from_u64(1234)).unwrap();
    assert_eq!(first, second);
}
