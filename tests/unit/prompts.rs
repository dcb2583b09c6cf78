use super::*;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

#[test]
fn known_types_have_their_own_sets() {
    assert_eq!(all_prompts("default").len(), 4);
    assert_eq!(all_prompts("primary").len(), 2);
    assert_eq!(all_prompts("secondary").len(), 2);
}

#[test]
fn unknown_types_fall_back_to_default() {
    assert_eq!(all_prompts("ultraviolet"), all_prompts("default"));
    let mut rng = StdRng::seed_from_u64(0);
    let p = get_prompt("ultraviolet", &mut rng);
    assert!(all_prompts("default").contains(&p));
}

#[test]
fn picks_come_from_the_requested_set() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..200 {
        let p = get_prompt("primary", &mut rng);
        assert!(all_prompts("primary").contains(&p));
        seen.insert(p);
    }
    assert_eq!(seen.len(), 2);
}
