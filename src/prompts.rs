//! Instruction prompts keyed by task type.

use rand::Rng;
use rand::seq::SliceRandom as _;

const DEFAULT: &[&str] = &[
    "Predict the additive color mixing result. Show how the two light sources combine in the marked mixing zone.",
    "Demonstrate additive color mixing. Visualize the overlapping light beams merging to create a new color.",
    "Apply additive color mixing rules. Animate the two colored lights blending together in the designated area.",
    "Show the result of combining these colored lights using additive color mixing principles.",
];

const PRIMARY: &[&str] = &[
    "Predict the additive color mixing result using primary light colors. Show the combination in the mixing zone.",
    "Demonstrate how primary colored lights mix additively to produce a new color.",
];

const SECONDARY: &[&str] = &[
    "Show the additive mixing result. Two colored lights combine to create a secondary color.",
    "Apply additive color mixing. The overlapping light beams will produce a distinct secondary color.",
];

/// Every prompt for `task_type`; unknown types get the `"default"` set.
pub fn all_prompts(task_type: &str) -> &'static [&'static str] {
    match task_type {
        "primary" => PRIMARY,
        "secondary" => SECONDARY,
        _ => DEFAULT,
    }
}

/// Pick one prompt for `task_type` uniformly at random.
pub fn get_prompt<R: Rng + ?Sized>(task_type: &str, rng: &mut R) -> &'static str {
    all_prompts(task_type)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT[0])
}

#[cfg(test)]
#[path = "../tests/unit/prompts.rs"]
mod tests;
