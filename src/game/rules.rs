use hexx::Hex;
use rand::Rng;

use super::RuleSettings;
use super::board::Board;
use crate::math;

/// The player token: a position on the board and a health pool.
///
/// `position` always names an existing cell; it starts at the origin and
/// returns there on respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    /// Current cell coordinate.
    pub position: Hex,
    /// Current health. Re-clamped to the configured start value whenever it
    /// drops to zero or below.
    pub health: i32,
}

/// What a move attempt did, so the presentation layer knows what to repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target missing or not adjacent; nothing changed.
    Rejected,
    /// Plain move: player token moved, `vacated` decayed.
    Moved {
        /// The cell the player just left.
        vacated: Hex,
    },
    /// The move dropped health to ≤ 0. The player respawned at the origin
    /// with full health; decay and detonation were skipped for this move.
    Died,
    /// The move landed on a live special cell: every cell now holds the
    /// canonical reset value and the highlight is gone.
    Detonated {
        /// The cell the player just left.
        vacated: Hex,
    },
}

/// Sole authority for player movement and the rules that follow from it.
///
/// Owns the [`Board`] and [`Player`] exclusively; callers interact through
/// [`Game::attempt_move`] and read-only accessors. Rendering happens
/// elsewhere, driven by the returned [`MoveOutcome`].
pub struct Game {
    board: Board,
    player: Player,
    rules: RuleSettings,
}

impl Game {
    /// Wraps a generated board; the player starts at the origin with full
    /// health.
    pub fn new(board: Board, rules: RuleSettings) -> Self {
        let player = Player {
            position: Hex::ZERO,
            health: rules.start_health,
        };
        Self {
            board,
            player,
            rules,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Processes one pointer selection, fully and in order:
    ///
    /// 1. reject silently if the target cell does not exist;
    /// 2. reject silently if it is not adjacent to the player (a cell is
    ///    never adjacent to itself, so self-moves are rejected too);
    /// 3. move and apply the target cell's value to health;
    /// 4. on health ≤ 0, respawn (full health, origin) and stop — the
    ///    vacated cell does not decay and a special target does not detonate
    ///    on the move that killed;
    /// 5. decay the vacated cell by a uniform draw in `[1, decay_max]`;
    /// 6. if the target was a live special cell, reset the whole board to
    ///    the canonical value. The detonation flag makes this one-shot:
    ///    landing there again is a plain move.
    pub fn attempt_move<R: Rng>(&mut self, target: Hex, rng: &mut R) -> MoveOutcome {
        let Some(cell) = self.board.get(target).copied() else {
            return MoveOutcome::Rejected;
        };
        if !math::is_adjacent(self.player.position, target) {
            return MoveOutcome::Rejected;
        }

        let vacated = self.player.position;
        self.player.position = target;
        self.player.health += cell.value;

        if self.player.health <= 0 {
            self.player.health = self.rules.start_health;
            self.player.position = Hex::ZERO;
            return MoveOutcome::Died;
        }

        let decay = rng.random_range(1..=self.rules.decay_max);
        self.board.apply_decay(vacated, decay);

        if cell.special && !cell.detonated {
            self.board.reset_all_values(self.rules.reset_value);
            return MoveOutcome::Detonated { vacated };
        }

        MoveOutcome::Moved { vacated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Cell, Tone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rules() -> RuleSettings {
        RuleSettings {
            start_health: 75,
            decay_max: 100,
            reset_value: 10,
        }
    }

    fn cell(value: i32) -> Cell {
        Cell {
            value,
            special: false,
            detonated: false,
        }
    }

    fn special_cell(value: i32) -> Cell {
        Cell {
            value,
            special: true,
            detonated: false,
        }
    }

    /// Radius-1 board with an explicit origin and whatever neighbors a test
    /// wants to pin down.
    fn game_with(neighbors: &[(Hex, Cell)]) -> Game {
        let mut cells = vec![(Hex::ZERO, cell(0))];
        cells.extend_from_slice(neighbors);
        Game::new(Board::from_cells(1, cells), rules())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // ── rejection ───────────────────────────────────────────────────

    #[test]
    fn move_to_a_nonexistent_cell_changes_nothing() {
        let mut game = game_with(&[(Hex::new(1, 0), cell(20))]);
        let outcome = game.attempt_move(Hex::new(5, 5), &mut rng());
        assert_eq!(outcome, MoveOutcome::Rejected);
        assert_eq!(game.player().position, Hex::ZERO);
        assert_eq!(game.player().health, 75);
    }

    #[test]
    fn move_to_a_non_adjacent_cell_changes_nothing() {
        let far = Hex::new(2, 0);
        let mut game = game_with(&[(Hex::new(1, 0), cell(20)), (far, cell(50))]);
        let outcome = game.attempt_move(far, &mut rng());
        assert_eq!(outcome, MoveOutcome::Rejected);
        assert_eq!(game.player().position, Hex::ZERO);
        assert_eq!(game.player().health, 75);
        // The current cell keeps its value: no phantom decay on rejection.
        assert_eq!(game.board().get(Hex::ZERO).unwrap().value, 0);
    }

    #[test]
    fn moving_onto_the_current_cell_is_rejected() {
        let mut game = game_with(&[(Hex::new(1, 0), cell(20))]);
        assert_eq!(game.attempt_move(Hex::ZERO, &mut rng()), MoveOutcome::Rejected);
    }

    // ── plain moves ─────────────────────────────────────────────────

    #[test]
    fn health_changes_by_exactly_the_target_value() {
        let target = Hex::new(1, -1);
        let mut game = game_with(&[(target, cell(20))]);
        let outcome = game.attempt_move(target, &mut rng());
        assert_eq!(outcome, MoveOutcome::Moved { vacated: Hex::ZERO });
        assert_eq!(game.player().position, target);
        assert_eq!(game.player().health, 95);
    }

    #[test]
    fn the_vacated_cell_decays_by_one_to_a_hundred() {
        let target = Hex::new(1, -1);
        let mut game = game_with(&[(target, cell(20))]);
        game.attempt_move(target, &mut rng());

        let origin_value = game.board().get(Hex::ZERO).unwrap().value;
        assert!(
            (-100..=-1).contains(&origin_value),
            "origin should have decayed from 0 by [1, 100], got {origin_value}"
        );
        // The entered cell keeps its value until the player leaves it.
        assert_eq!(game.board().get(target).unwrap().value, 20);
    }

    #[test]
    fn moving_there_and_back_applies_the_decayed_value() {
        let target = Hex::new(1, -1);
        let mut game = game_with(&[(target, cell(20))]);
        let mut rng = rng();

        game.attempt_move(target, &mut rng);
        assert_eq!(game.player().health, 95);

        let origin_value = game.board().get(Hex::ZERO).unwrap().value;
        let outcome = game.attempt_move(Hex::ZERO, &mut rng);
        if 95 + origin_value > 0 {
            assert_eq!(outcome, MoveOutcome::Moved { vacated: target });
            assert_eq!(game.player().health, 95 + origin_value);
        } else {
            // Decay drew 95+: walking back onto the origin kills instead.
            assert_eq!(outcome, MoveOutcome::Died);
            assert_eq!(game.player().health, 75);
        }
    }

    // ── death & respawn ─────────────────────────────────────────────

    #[test]
    fn lethal_cell_respawns_at_the_origin_with_full_health() {
        let target = Hex::new(1, 0);
        let mut game = game_with(&[(target, cell(-80))]);
        let outcome = game.attempt_move(target, &mut rng());

        // 75 - 80 = -5 → death → respawn.
        assert_eq!(outcome, MoveOutcome::Died);
        assert_eq!(game.player().health, 75);
        assert_eq!(game.player().position, Hex::ZERO);
    }

    #[test]
    fn death_skips_the_decay_step() {
        let target = Hex::new(1, 0);
        let mut game = game_with(&[(target, cell(-80))]);
        game.attempt_move(target, &mut rng());
        assert_eq!(game.board().get(Hex::ZERO).unwrap().value, 0);
        assert_eq!(game.board().get(target).unwrap().value, -80);
    }

    #[test]
    fn dying_on_a_special_cell_does_not_detonate_it() {
        let target = Hex::new(0, -1);
        let bystander = Hex::new(1, 0);
        let mut game = game_with(&[(target, special_cell(-200)), (bystander, cell(-30))]);
        let outcome = game.attempt_move(target, &mut rng());

        assert_eq!(outcome, MoveOutcome::Died);
        assert_eq!(game.board().get(bystander).unwrap().value, -30);
        assert_eq!(game.board().get(target).unwrap().tone(), Tone::Special);
    }

    #[test]
    fn exact_zero_health_counts_as_death() {
        let target = Hex::new(-1, 0);
        let mut game = game_with(&[(target, cell(-75))]);
        assert_eq!(game.attempt_move(target, &mut rng()), MoveOutcome::Died);
        assert_eq!(game.player().health, 75);
    }

    // ── detonation ──────────────────────────────────────────────────

    #[test]
    fn landing_on_a_special_cell_resets_the_whole_board() {
        let target = Hex::new(0, 1);
        let bystander = Hex::new(-1, 1);
        let mut game = game_with(&[(target, special_cell(5)), (bystander, cell(-90))]);
        let outcome = game.attempt_move(target, &mut rng());

        assert_eq!(outcome, MoveOutcome::Detonated { vacated: Hex::ZERO });
        assert_eq!(game.player().health, 80);
        for (hex, cell) in game.board().iter() {
            assert_eq!(cell.value, 10, "{hex:?} not reset");
            assert_eq!(cell.tone(), Tone::Positive);
        }
    }

    #[test]
    fn a_detonated_special_cell_never_fires_again() {
        let target = Hex::new(0, 1);
        let mut game = game_with(&[(target, special_cell(5)), (Hex::new(1, 0), cell(3))]);
        let mut rng = rng();

        assert!(matches!(
            game.attempt_move(target, &mut rng),
            MoveOutcome::Detonated { .. }
        ));

        // Step off, then back onto the former special cell.
        assert!(matches!(
            game.attempt_move(Hex::ZERO, &mut rng),
            MoveOutcome::Moved { .. } | MoveOutcome::Died
        ));
        let outcome = game.attempt_move(target, &mut rng);
        assert!(
            matches!(outcome, MoveOutcome::Moved { .. } | MoveOutcome::Died),
            "re-landing must not detonate, got {outcome:?}"
        );
    }

    #[test]
    fn non_special_cells_never_detonate() {
        let target = Hex::new(1, -1);
        let mut game = game_with(&[(target, cell(90)), (Hex::new(1, 0), cell(-90))]);
        let outcome = game.attempt_move(target, &mut rng());
        assert!(matches!(outcome, MoveOutcome::Moved { .. }));
        assert_eq!(game.board().get(Hex::new(1, 0)).unwrap().value, -90);
    }
}
