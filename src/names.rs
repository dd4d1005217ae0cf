//! Display names for AI seats.

use rand::seq::IndexedRandom;
use rand::Rng;

/// The pool bot names are drawn from.
pub const AI_NAMES: [&str; 16] = [
    "Captain Waffle",
    "Pixel Panda",
    "Cosmic Noodle",
    "Turbo Sprout",
    "Neon Gecko",
    "Jellybean",
    "Moonlight Moth",
    "Gizmo Goblin",
    "Rocket Raccoon",
    "Disco Sloth",
    "Cactus Cat",
    "Bubble Badger",
    "Wobble Wizard",
    "Mango Moose",
    "Crispy Comet",
    "Zigzag Zebra",
];

/// Draws `count` distinct names that are not in `taken`.
///
/// Once the pool runs dry the remaining picks are `"Bot <n>"`, numbered after
/// everything taken so far.
pub fn pick_ai_names<R: Rng + ?Sized>(count: usize, taken: &[String], rng: &mut R) -> Vec<String> {
    let mut taken: Vec<String> = taken.to_vec();
    let mut names = Vec::with_capacity(count);

    for _ in 0..count {
        let available: Vec<&str> = AI_NAMES
            .iter()
            .copied()
            .filter(|name| !taken.iter().any(|t| t == name))
            .collect();
        let pick = match available.choose(rng) {
            Some(name) => name.to_string(),
            None => format!("Bot {}", taken.len() + 1),
        };
        taken.push(pick.clone());
        names.push(pick);
    }
    names
}
