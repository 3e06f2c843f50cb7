use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// The fixed face values dealt every round
pub const CARD_VALUES: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardOutcome {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

/// A single card on the board. Whether it can be picked is decided by the
/// session, not by the card.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Card {
    pub value: u8,
    pub visible: bool,
    pub outcome: CardOutcome,
}

impl Card {
    pub fn face_up(value: u8) -> Self {
        Self {
            value,
            visible: true,
            outcome: CardOutcome::Neutral,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn reveal(&mut self, outcome: CardOutcome) {
        self.visible = true;
        self.outcome = outcome;
    }
}

/// Cards and target for one round
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub cards: Vec<Card>,
    pub target: u8,
}

/// Uniform permutation of the card values (Fisher-Yates via `SliceRandom`)
pub fn shuffled_values<R: Rng + ?Sized>(rng: &mut R) -> [u8; 9] {
    let mut values = CARD_VALUES;
    values.shuffle(rng);
    values
}

/// Deals nine face-up cards in random order and picks the target among them
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let values = shuffled_values(rng);
    let target = values[rng.gen_range(0..values.len())];

    Deal {
        cards: values.iter().copied().map(Card::face_up).collect(),
        target,
    }
}
