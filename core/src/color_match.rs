use alloc::vec::Vec;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Position of a color in [`ColorMatchConfig::palette`].
pub type ColorIndex = u8;

const COUNTDOWN_PERIOD_MS: u32 = 1_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u16,
    pub color: ColorIndex,
    pub matched: bool,
    pub flipped: bool,
}

impl Tile {
    pub const fn is_face_up(self) -> bool {
        self.matched || self.flipped
    }

    pub const fn can_flip(self) -> bool {
        !self.matched && !self.flipped
    }
}

/// Shuffled board holding every palette color exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileBoard {
    tiles: Vec<Tile>,
}

impl TileBoard {
    pub fn shuffled<R: Rng + ?Sized>(color_count: usize, rng: &mut R) -> Self {
        let max_colors = usize::from(ColorIndex::MAX) + 1;
        if color_count > max_colors {
            log::warn!("{} colors requested, the board holds at most {}", color_count, max_colors);
        }
        let color_count = color_count.min(max_colors);
        let mut colors: Vec<ColorIndex> = (0..color_count)
            .flat_map(|color| {
                let color = color as ColorIndex;
                [color, color]
            })
            .collect();
        colors.shuffle(rng);
        Self::from_layout(&colors)
    }

    /// Board with a fixed layout, every color must appear exactly twice.
    pub fn from_colors(colors: &[ColorIndex]) -> Result<Self> {
        for &color in colors {
            if colors.iter().filter(|&&other| other == color).count() != 2 {
                return Err(PlayError::InvalidConfig(alloc::format!(
                    "color {} must appear on exactly two tiles",
                    color
                )));
            }
        }
        Ok(Self::from_layout(colors))
    }

    fn from_layout(colors: &[ColorIndex]) -> Self {
        let tiles = colors
            .iter()
            .enumerate()
            .map(|(id, &color)| Tile {
                id: id as u16,
                color,
                matched: false,
                flipped: false,
            })
            .collect();
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.matched).count() / 2
    }

    pub fn flipped_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.flipped).count()
    }

    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(|tile| tile.matched)
    }

    fn flip(&mut self, index: usize) {
        self.tiles[index].flipped = true;
    }

    fn is_pair(&self, a: usize, b: usize) -> bool {
        a != b && self.tiles[a].color == self.tiles[b].color
    }

    /// Locks a matching pair or turns a mismatched pair back over. Returns whether they matched.
    fn settle_pair(&mut self, a: usize, b: usize) -> bool {
        let matched = self.is_pair(a, b);
        for index in [a, b] {
            let tile = &mut self.tiles[index];
            tile.flipped = false;
            tile.matched = tile.matched || matched;
        }
        matched
    }
}

/// Memory game against a countdown. Two tiles are compared at a time, with input locked while both show.
#[derive(Debug)]
pub struct ColorMatch<T: Timers> {
    config: ColorMatchConfig,
    rng: SmallRng,
    timers: T,
    session: Session,
    board: TileBoard,
    face_up: SmallVec<[usize; 2]>,
    accepting_input: bool,
    moves: u32,
    flips: u32,
    seconds_left: u32,
    countdown: Option<TimerId>,
    compare: Option<TimerId>,
}

impl<T: Timers> ColorMatch<T> {
    pub fn new(config: ColorMatchConfig, seed: u64, timers: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_unchecked(config, seed, timers))
    }

    /// Builds the game without validating `config`.
    pub fn new_unchecked(config: ColorMatchConfig, seed: u64, timers: T) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = TileBoard::shuffled(config.pair_count(), &mut rng);
        let seconds_left = config.countdown_secs;
        let mut game = Self {
            config,
            rng,
            timers,
            session: Session::new(0),
            board,
            face_up: SmallVec::new(),
            accepting_input: true,
            moves: 0,
            flips: 0,
            seconds_left,
            countdown: None,
            compare: None,
        };
        game.draw_prize();
        game
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn palette(&self) -> &[alloc::string::String] {
        &self.config.palette
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn flips(&self) -> u32 {
        self.flips
    }

    pub fn max_moves(&self) -> u32 {
        self.config.max_moves
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input && !self.session.is_finished()
    }

    /// Starts the countdown. Flipping the first tile does this implicitly.
    pub fn start(&mut self) -> PlayOutcome {
        if !self.session.status().is_idle() {
            return PlayOutcome::NoChange;
        }
        self.session.activate();
        self.countdown = Some(self.timers.start_interval(COUNTDOWN_PERIOD_MS));
        PlayOutcome::Progressed
    }

    pub fn flip(&mut self, index: usize) -> Result<PlayOutcome> {
        let tile = self.board.tile(index).ok_or(PlayError::InvalidIndex)?;
        if !self.is_accepting_input() {
            log::trace!("flip of tile {} ignored, input is locked", index);
            return Ok(PlayOutcome::NoChange);
        }
        if !tile.can_flip() {
            return Ok(PlayOutcome::NoChange);
        }

        self.start();
        self.board.flip(index);
        self.flips += 1;
        self.face_up.push(index);
        log::trace!("flipped tile {} ({} face up)", index, self.face_up.len());

        if self.face_up.len() == 2 {
            self.moves += 1;
            self.accepting_input = false;
            self.session.set_revealing();
            self.compare = Some(self.timers.start_timeout(self.config.compare_delay_ms));
        }
        Ok(PlayOutcome::Progressed)
    }

    fn pending_pair(&self) -> Option<(usize, usize)> {
        match self.face_up.as_slice() {
            &[a, b] => Some((a, b)),
            _ => None,
        }
    }

    fn pending_pair_completes_board(&self) -> bool {
        self.pending_pair().is_some_and(|(a, b)| {
            self.board.is_pair(a, b) && self.board.matched_pairs() + 1 == self.board.pair_count()
        })
    }

    fn resolve_pair(&mut self) -> PlayOutcome {
        let Some((a, b)) = self.pending_pair() else {
            return PlayOutcome::NoChange;
        };
        if let Some(id) = self.compare.take() {
            self.timers.cancel(id);
        }

        let matched = self.board.settle_pair(a, b);
        log::debug!(
            "tiles {} and {} {}",
            a,
            b,
            if matched { "matched" } else { "did not match" }
        );
        self.face_up.clear();
        self.accepting_input = true;

        if self.board.is_complete() {
            return self.finish();
        }
        self.session.set_active();
        PlayOutcome::Progressed
    }

    fn finish(&mut self) -> PlayOutcome {
        self.cancel_timers();
        if self.moves <= self.config.max_moves {
            self.session.win()
        } else {
            log::debug!(
                "board cleared in {} moves, over the limit of {}",
                self.moves,
                self.config.max_moves
            );
            self.session.lose(LossReason::TooManyMoves)
        }
    }

    fn tick(&mut self) -> PlayOutcome {
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return PlayOutcome::Progressed;
        }

        // a final pair still in its cool-down counts as found in time
        if self.pending_pair_completes_board() {
            log::debug!("countdown ran out during the final comparison, resolving it first");
            return self.resolve_pair();
        }

        self.cancel_timers();
        self.accepting_input = false;
        self.session.lose(LossReason::Expired)
    }

    fn cancel_timers(&mut self) {
        for id in [self.countdown.take(), self.compare.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
    }

    fn draw_prize(&mut self) {
        let prize = pick_uniform(&self.config.prizes, &mut self.rng);
        self.session.select(prize);
    }
}

impl<T: Timers> RewardGame for ColorMatch<T> {
    fn session(&self) -> &Session {
        &self.session
    }

    fn progress(&self) -> f32 {
        match self.board.pair_count() {
            0 => 0.0,
            pairs => self.board.matched_pairs() as f32 / pairs as f32,
        }
    }

    fn reset(&mut self) {
        self.cancel_timers();
        self.board = TileBoard::shuffled(self.config.pair_count(), &mut self.rng);
        self.face_up.clear();
        self.accepting_input = true;
        self.moves = 0;
        self.flips = 0;
        self.seconds_left = self.config.countdown_secs;
        self.session = self.session.next();
        self.draw_prize();
        log::debug!("color match reset to session {}", self.session.generation());
    }

    fn teardown(&mut self) {
        self.cancel_timers();
    }
}

impl<T: Timers> TimerDriven for ColorMatch<T> {
    type Timers = T;

    fn timers(&self) -> &T {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    fn on_timer(&mut self, id: TimerId) -> PlayOutcome {
        if self.session.is_finished() {
            return PlayOutcome::NoChange;
        }
        if self.compare == Some(id) {
            return self.resolve_pair();
        }
        if self.countdown == Some(id) {
            return self.tick();
        }
        PlayOutcome::NoChange
    }
}
