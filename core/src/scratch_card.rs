use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Scratch surface cell position `(x, y)`.
pub type Cell = (u16, u16);

/// Coverage grid standing in for the scratchable coating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScratchSurface {
    cleared: Array2<bool>,
    cleared_count: u32,
}

impl ScratchSurface {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            cleared: Array2::default([usize::from(columns), usize::from(rows)]),
            cleared_count: 0,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        let dim = self.cleared.dim();
        (dim.0 as u16, dim.1 as u16)
    }

    pub fn contains(&self, (x, y): Cell) -> bool {
        let (columns, rows) = self.size();
        x < columns && y < rows
    }

    pub fn total_cells(&self) -> u32 {
        self.cleared.len() as u32
    }

    pub fn cleared_count(&self) -> u32 {
        self.cleared_count
    }

    pub fn is_cleared(&self, (x, y): Cell) -> bool {
        self.contains((x, y)) && self.cleared[[usize::from(x), usize::from(y)]]
    }

    pub fn cleared_fraction(&self) -> f32 {
        match self.total_cells() {
            0 => 0.0,
            total => self.cleared_count as f32 / total as f32,
        }
    }

    /// Clears every cell within `radius` of `center`, returning how many were newly cleared.
    pub fn erase(&mut self, center: Cell, radius: u16) -> u32 {
        let (columns, rows) = self.size();
        let radius = i32::from(radius);
        let (cx, cy) = (i32::from(center.0), i32::from(center.1));
        let mut newly_cleared = 0;

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= i32::from(columns) || y >= i32::from(rows) {
                    continue;
                }
                let cell = &mut self.cleared[[x as usize, y as usize]];
                if !*cell {
                    *cell = true;
                    newly_cleared += 1;
                }
            }
        }

        self.cleared_count += newly_cleared;
        newly_cleared
    }
}

/// Points visited when dragging from `from` to `to`, both ends included.
fn stroke_points(from: Cell, to: Cell) -> impl Iterator<Item = Cell> {
    let (x0, y0) = (i32::from(from.0), i32::from(from.1));
    let (dx, dy) = (i32::from(to.0) - x0, i32::from(to.1) - y0);
    let steps = dx.abs().max(dy.abs()).max(1);
    (0..=steps).map(move |step| {
        let x = x0 + dx * step / steps;
        let y = y0 + dy * step / steps;
        (x as u16, y as u16)
    })
}

/// Scratch-off ticket: the prize is fixed when the session starts and revealed once enough coating is gone.
#[derive(Clone, Debug)]
pub struct ScratchCard {
    config: ScratchCardConfig,
    rng: SmallRng,
    surface: ScratchSurface,
    session: Session,
}

impl ScratchCard {
    pub fn new(config: ScratchCardConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_unchecked(config, seed))
    }

    /// Builds the card without validating `config`.
    pub fn new_unchecked(config: ScratchCardConfig, seed: u64) -> Self {
        let surface = ScratchSurface::new(config.columns, config.rows);
        let mut card = Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            surface,
            session: Session::new(0),
        };
        card.draw_prize();
        card
    }

    /// The prize printed under the coating.
    pub fn prize(&self) -> Option<&RewardOption> {
        self.session.selected()
    }

    pub fn surface(&self) -> &ScratchSurface {
        &self.surface
    }

    pub fn reveal_threshold(&self) -> f32 {
        self.config.reveal_threshold
    }

    pub fn scratch(&mut self, cell: Cell) -> Result<PlayOutcome> {
        if !self.surface.contains(cell) {
            return Err(PlayError::InvalidIndex);
        }
        if self.session.is_finished() {
            return Ok(PlayOutcome::NoChange);
        }

        self.session.activate();
        self.session.set_revealing();
        let newly_cleared = self.surface.erase(cell, self.config.brush_radius);
        log::trace!(
            "scratch at {:?} cleared {} cells, {:.3} total",
            cell,
            newly_cleared,
            self.surface.cleared_fraction()
        );

        if self.surface.cleared_fraction() > self.config.reveal_threshold {
            return Ok(self.session.win());
        }

        self.session.set_active();
        Ok(if newly_cleared > 0 {
            PlayOutcome::Progressed
        } else {
            PlayOutcome::NoChange
        })
    }

    /// Scratches every cell along a drag from `from` to `to`.
    pub fn scratch_line(&mut self, from: Cell, to: Cell) -> Result<PlayOutcome> {
        if !self.surface.contains(from) || !self.surface.contains(to) {
            return Err(PlayError::InvalidIndex);
        }

        let mut outcome = PlayOutcome::NoChange;
        for point in stroke_points(from, to) {
            outcome = outcome | self.scratch(point)?;
            if self.session.is_finished() {
                break;
            }
        }
        Ok(outcome)
    }

    fn draw_prize(&mut self) {
        let prize = pick_uniform(&self.config.prizes, &mut self.rng);
        self.session.select(prize);
    }
}

impl RewardGame for ScratchCard {
    fn session(&self) -> &Session {
        &self.session
    }

    fn progress(&self) -> f32 {
        self.surface.cleared_fraction()
    }

    fn reset(&mut self) {
        self.surface = ScratchSurface::new(self.config.columns, self.config.rows);
        self.session = self.session.next();
        self.draw_prize();
        log::debug!("scratch card reset to session {}", self.session.generation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScratchCardConfig {
        ScratchCardConfig {
            columns: 10,
            rows: 10,
            brush_radius: 0,
            ..Default::default()
        }
    }

    #[test]
    fn erase_counts_each_cell_once() {
        let mut surface = ScratchSurface::new(5, 5);

        assert_eq!(surface.erase((2, 2), 1), 5);
        assert_eq!(surface.erase((2, 2), 1), 0);
        assert_eq!(surface.erase((0, 0), 1), 3);
        assert_eq!(surface.cleared_count(), 8);
        assert!(surface.is_cleared((1, 2)));
        assert!(!surface.is_cleared((1, 1)));
    }

    #[test]
    fn win_latches_on_first_threshold_crossing() {
        let mut card = ScratchCard::new(config(), 42).unwrap();
        let prize = card.prize().cloned().unwrap();
        let mut wins = 0;

        for y in 0..10 {
            for x in 0..10 {
                let outcome = card.scratch((x, y)).unwrap();
                if outcome.is_won() {
                    wins += 1;
                    assert_eq!(outcome, PlayOutcome::Won(prize.clone()));
                    // 31 of 100 cells is the first fraction above 30%.
                    assert_eq!(card.surface().cleared_count(), 31);
                }
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(card.status(), SessionStatus::Won);
        assert_eq!(card.surface().cleared_count(), 31);
    }

    #[test]
    fn threshold_must_be_exceeded_not_reached() {
        let mut card = ScratchCard::new(config(), 1).unwrap();

        for x in 0..10 {
            for y in 0..3 {
                assert_eq!(card.scratch((x, y)).unwrap(), PlayOutcome::Progressed);
            }
        }

        assert_eq!(card.progress(), 0.3);
        assert_eq!(card.status(), SessionStatus::Active);
        assert!(card.scratch((0, 3)).unwrap().is_won());
    }

    #[test]
    fn drag_stroke_clears_cells_along_the_line() {
        let mut card = ScratchCard::new(config(), 3).unwrap();

        assert_eq!(card.scratch_line((0, 0), (9, 0)).unwrap(), PlayOutcome::Progressed);
        assert_eq!(card.surface().cleared_count(), 10);
        assert_eq!(card.scratch_line((0, 9), (0, 9)).unwrap(), PlayOutcome::Progressed);
        assert_eq!(card.surface().cleared_count(), 11);
        assert!(card.surface().is_cleared((0, 9)));
    }

    #[test]
    fn drag_stops_once_the_prize_is_revealed() {
        let mut card = ScratchCard::new(
            ScratchCardConfig {
                columns: 4,
                rows: 4,
                brush_radius: 0,
                ..Default::default()
            },
            8,
        )
        .unwrap();

        // 5 of 16 cells clears 31.25%.
        card.scratch_line((0, 0), (3, 0)).unwrap();
        assert!(card.scratch_line((0, 1), (3, 1)).unwrap().is_won());
        assert_eq!(card.surface().cleared_count(), 5);
        assert_eq!(card.scratch_line((0, 3), (3, 3)).unwrap(), PlayOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_scratch_is_rejected() {
        let mut card = ScratchCard::new(config(), 0).unwrap();

        assert_eq!(card.scratch((10, 0)), Err(PlayError::InvalidIndex));
        assert_eq!(card.scratch_line((0, 0), (0, 10)), Err(PlayError::InvalidIndex));
        assert_eq!(card.status(), SessionStatus::Idle);
    }

    #[test]
    fn reset_restores_the_coating() {
        let mut card = ScratchCard::new(config(), 4).unwrap();
        card.scratch_line((0, 0), (9, 3)).unwrap();

        card.reset();

        assert_eq!(card.generation(), 1);
        assert_eq!(card.status(), SessionStatus::Idle);
        assert_eq!(card.surface().cleared_count(), 0);
        assert!(card.prize().is_some());
    }

    #[test]
    fn constructor_rejects_unreachable_thresholds() {
        for reveal_threshold in [0.0, 1.0, 1.5] {
            let config = ScratchCardConfig {
                reveal_threshold,
                ..config()
            };
            assert!(matches!(
                ScratchCard::new(config, 0),
                Err(PlayError::InvalidConfig(_))
            ));
        }

        let empty = ScratchCardConfig {
            columns: 0,
            ..config()
        };
        assert!(ScratchCard::new(empty, 0).is_err());
    }
}
