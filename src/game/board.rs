use bevy::platform::collections::HashMap;
use hexx::{Hex, shapes};
use rand::Rng;

use super::BoardSettings;

/// One cell of the board, keyed by its axial coordinate in [`Board`].
///
/// Display color is never stored; it is derived from this state through
/// [`Cell::tone`] so the painted board can never drift out of sync with the
/// data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Health delta applied to the player on entry. Decays after the player
    /// leaves the cell.
    pub value: i32,
    /// Generated as a trigger cell. Immutable after generation; the origin is
    /// never special.
    pub special: bool,
    /// Set once the board-wide reset has fired. A detonated special cell
    /// renders by value sign and never explodes again.
    pub detonated: bool,
}

impl Cell {
    /// Derived display tone: the special highlight until detonation, then
    /// plain sign coloring (strictly positive reads as positive).
    pub fn tone(&self) -> Tone {
        if self.special && !self.detonated {
            Tone::Special
        } else if self.value > 0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }

    /// Text shown on the cell: the magnitude of its value.
    pub fn label(&self) -> String {
        self.value.abs().to_string()
    }
}

/// Display tone of a cell, mapped to a fill color by the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Strictly positive value.
    Positive,
    /// Zero or negative value.
    Negative,
    /// Special cell that has not detonated yet.
    Special,
}

/// Owns every [`Cell`] of the hexagonal region of radius R around the origin.
///
/// Cells are created once at generation time and live for the whole session;
/// only their values (and the detonation flag) mutate afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct Board {
    radius: u32,
    cells: HashMap<Hex, Cell>,
}

impl Board {
    /// Generates the board from an injected random source.
    ///
    /// Every coordinate with |q|, |r|, |q+r| ≤ R gets a value uniform in
    /// `[-value_spread, value_spread)` and is special with
    /// `special_chance` probability. Both draws happen for the origin too,
    /// which is then overridden to a zero-value, never-special start cell.
    pub fn generate<R: Rng>(s: &BoardSettings, rng: &mut R) -> Self {
        let mut cells = HashMap::new();
        for hex in shapes::hexagon(Hex::ZERO, s.radius) {
            let value = rng.random_range(-s.value_spread..s.value_spread);
            let special = rng.random_bool(s.special_chance);
            let cell = if hex == Hex::ZERO {
                Cell {
                    value: 0,
                    special: false,
                    detonated: false,
                }
            } else {
                Cell {
                    value,
                    special,
                    detonated: false,
                }
            };
            cells.insert(hex, cell);
        }
        Self {
            radius: s.radius,
            cells,
        }
    }

    /// Test constructor with explicit cells.
    #[cfg(test)]
    pub fn from_cells(radius: u32, cells: impl IntoIterator<Item = (Hex, Cell)>) -> Self {
        Self {
            radius,
            cells: cells.into_iter().collect(),
        }
    }

    /// Generation radius R.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells: 3R(R+1) + 1.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell lookup. A miss means the coordinate lies outside the generated
    /// region, which is an expected outcome rather than an error.
    pub fn get(&self, hex: Hex) -> Option<&Cell> {
        self.cells.get(&hex)
    }

    /// Iterates all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (&Hex, &Cell)> {
        self.cells.iter()
    }

    /// Subtracts a positive `amount` from the cell's value. A miss is a no-op.
    pub fn apply_decay(&mut self, hex: Hex, amount: i32) {
        debug_assert!(amount >= 1, "decay must be a positive draw");
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.value -= amount;
        }
    }

    /// Board-wide reset: every cell's value becomes `value` and every special
    /// cell is marked detonated, clearing the highlight for good. Calling
    /// this again changes nothing further.
    pub fn reset_all_values(&mut self, value: i32) {
        for cell in self.cells.values_mut() {
            cell.value = value;
            if cell.special {
                cell.detonated = true;
            }
        }
    }
}
