use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{NoteFragment, Result, RhythmError, CATALOG};

/// Collaborator that re-deals the offered catalog whenever a measure is reset.
pub trait CatalogShuffler {
    fn reshuffle(&mut self);
}

/// The catalog in the order it is currently offered to the player.
///
/// Each reshuffle starts again from the full static catalog and applies an
/// independent uniform permutation.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<NoteFragment>,
    rng: StdRng,
}

impl Deck {
    /// Shuffled deck seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Shuffled deck whose orders are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut deck = Self {
            cards: CATALOG.to_vec(),
            rng,
        };
        deck.reshuffle();
        deck
    }

    pub fn cards(&self) -> &[NoteFragment] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a zero-based position in the current order.
    pub fn card(&self, position: usize) -> Result<NoteFragment> {
        self.cards
            .get(position)
            .copied()
            .ok_or(RhythmError::NoSuchCard {
                position,
                len: self.cards.len(),
            })
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogShuffler for Deck {
    fn reshuffle(&mut self) {
        self.cards.clear();
        self.cards.extend_from_slice(&CATALOG);
        self.cards.shuffle(&mut self.rng);
        tracing::trace!(order = ?self.cards.iter().map(NoteFragment::id).collect::<Vec<_>>(), "deck reshuffled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_ids(cards: &[NoteFragment]) -> Vec<&'static str> {
        let mut ids: Vec<_> = cards.iter().map(NoteFragment::id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn every_shuffle_is_a_permutation_of_the_catalog() {
        let mut deck = Deck::seeded(7);
        for _ in 0..20 {
            assert_eq!(sorted_ids(deck.cards()), sorted_ids(&CATALOG));
            deck.reshuffle();
        }
    }

    #[test]
    fn same_seed_deals_same_order() {
        let a = Deck::seeded(42);
        let b = Deck::seeded(42);
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn reshuffles_eventually_change_the_order() {
        let mut deck = Deck::seeded(3);
        let first = deck.cards().to_vec();
        let changed = (0..10).any(|_| {
            deck.reshuffle();
            deck.cards() != first.as_slice()
        });
        assert!(changed);
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        let deck = Deck::seeded(1);
        assert!(deck.card(13).is_ok());
        let err = deck.card(14).unwrap_err();
        assert!(matches!(err, RhythmError::NoSuchCard { position: 14, len: 14 }));
    }
}
