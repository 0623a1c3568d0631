//! Turning raw pairs into a shuffled, direction-randomized card sequence.

use crate::shuffle::shuffled;
use crate::types::{Card, RawPair};
use rand::Rng;

/// Shuffle `pairs` and give every card an independent 50/50 direction.
pub fn build_cards<R: Rng + ?Sized>(pairs: &[RawPair], rng: &mut R) -> Vec<Card> {
    let order = shuffled(pairs, rng);
    let directions: Vec<bool> = order.iter().map(|_| rng.random_bool(0.5)).collect();
    assemble_cards(order, directions)
}

/// Build cards from pairs already in presentation order, one direction draw
/// per pair. `true` shows the primary side on the front.
///
/// Pairs beyond the last draw are dropped, so callers pass one draw per pair.
pub fn assemble_cards(
    pairs: impl IntoIterator<Item = RawPair>,
    directions: impl IntoIterator<Item = bool>,
) -> Vec<Card> {
    pairs
        .into_iter()
        .zip(directions)
        .enumerate()
        .map(|(id, (pair, native_to_foreign))| {
            let canonical_text = pair.secondary_text.clone();
            let (front, back) = if native_to_foreign {
                (pair.primary_text, pair.secondary_text)
            } else {
                (pair.secondary_text, pair.primary_text)
            };
            Card {
                id,
                front,
                back,
                canonical_text,
                direction_flag: native_to_foreign,
            }
        })
        .collect()
}
