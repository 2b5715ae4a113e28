use alloc::vec;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    FaceDown,
    Winner,
    Blank,
}

/// Pick-one-card game: one of the face-down cards hides the prize.
#[derive(Clone, Debug)]
pub struct LuckyDraw {
    config: LuckyDrawConfig,
    rng: SmallRng,
    session: Session,
    winning_card: usize,
    faces: Vec<CardFace>,
    picked: Option<usize>,
}

impl LuckyDraw {
    pub fn new(config: LuckyDrawConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_unchecked(config, seed))
    }

    /// Builds the table without validating `config`.
    pub fn new_unchecked(config: LuckyDrawConfig, seed: u64) -> Self {
        let faces = vec![CardFace::FaceDown; config.card_count];
        let mut draw = Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            session: Session::new(0),
            winning_card: 0,
            faces,
            picked: None,
        };
        draw.deal();
        draw
    }

    pub fn card_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    pub fn face_at(&self, card: usize) -> Option<CardFace> {
        self.faces.get(card).copied()
    }

    pub fn picked_card(&self) -> Option<usize> {
        self.picked
    }

    /// Position of the prize card, for rendering the reveal.
    pub fn winning_card(&self) -> usize {
        self.winning_card
    }

    pub fn pick(&mut self, card: usize) -> Result<PlayOutcome> {
        if card >= self.faces.len() {
            return Err(PlayError::InvalidIndex);
        }
        if self.session.is_finished() {
            log::trace!("pick of card {} ignored, draw is over", card);
            return Ok(PlayOutcome::NoChange);
        }

        self.session.activate();
        self.picked = Some(card);
        self.faces[card] = self.face_of(card);
        log::debug!("picked card {}", card);

        Ok(if card == self.winning_card {
            self.session.win()
        } else {
            self.session.lose(LossReason::WrongPick)
        })
    }

    /// Turns every card face up once the draw is over.
    pub fn reveal_all(&mut self) -> PlayOutcome {
        if !self.session.is_finished() {
            return PlayOutcome::NoChange;
        }

        let mut updated = false;
        for card in 0..self.faces.len() {
            if self.faces[card] == CardFace::FaceDown {
                self.faces[card] = self.face_of(card);
                updated = true;
            }
        }

        if updated {
            PlayOutcome::Progressed
        } else {
            PlayOutcome::NoChange
        }
    }

    fn face_of(&self, card: usize) -> CardFace {
        if card == self.winning_card {
            CardFace::Winner
        } else {
            CardFace::Blank
        }
    }

    fn deal(&mut self) {
        let prize = pick_uniform(&self.config.prizes, &mut self.rng);
        self.session.select(prize);
        self.winning_card = pick_slot(self.faces.len(), &mut self.rng).unwrap_or(0);
        log::trace!(
            "dealt {} cards for session {}",
            self.faces.len(),
            self.session.generation()
        );
    }
}

impl RewardGame for LuckyDraw {
    fn session(&self) -> &Session {
        &self.session
    }

    fn progress(&self) -> f32 {
        if self.picked.is_some() { 1.0 } else { 0.0 }
    }

    fn reset(&mut self) {
        self.faces.fill(CardFace::FaceDown);
        self.picked = None;
        self.session = self.session.next();
        self.deal();
        log::debug!("lucky draw reset to session {}", self.session.generation());
    }
}
