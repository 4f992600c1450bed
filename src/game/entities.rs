use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;
use rand::rngs::StdRng;

use super::board::Tone;
use super::rules::Game;

/// One hex tile. Its label is a `Text2d` child entity, kept by id so a
/// repaint can rewrite it directly.
#[derive(Component, Reflect)]
pub struct CellTile {
    /// The cell coordinate this tile draws.
    pub hex: Hex,
    /// The `Text2d` child showing the cell's value.
    pub label: Entity,
}

/// Marker on the `Text2d` children that show a tile's (or the player's) value.
#[derive(Component, Reflect)]
pub struct ValueLabel;

/// The player token. Its health label is a `Text2d` child entity.
#[derive(Component, Reflect)]
pub struct PlayerToken {
    /// The `Text2d` child showing current health.
    pub label: Entity,
}

/// Parent of every tile and the player token; resize scales this entity only.
#[derive(Component, Reflect)]
pub struct BoardRoot;

/// Marker on the "You died!" overlay text.
#[derive(Component, Reflect)]
pub struct DeathNotice;

/// The one owner of all game state: the rules core plus its random source.
///
/// Everything that mutates the board or the player goes through
/// [`Game::attempt_move`](super::rules::Game::attempt_move) on this resource.
#[derive(Resource)]
pub struct Session {
    /// Board + player + movement rules.
    pub game: Game,
    /// Injected generator; seedable through `GameConfig::seed`.
    pub rng: StdRng,
}

/// Maps cell coordinates to their spawned tile entity IDs.
#[derive(Resource)]
pub struct CellEntities {
    /// Lookup from hex to tile entity.
    pub map: HashMap<Hex, Entity>,
}

/// Shared material handles, one per display tone plus the player's.
///
/// Tiles repaint by swapping between these handles, never by mutating a
/// material in place.
#[derive(Resource)]
pub struct ToneMaterials {
    /// Fill for strictly positive cells.
    pub positive: Handle<ColorMaterial>,
    /// Fill for zero/negative cells.
    pub negative: Handle<ColorMaterial>,
    /// Highlight fill for un-detonated special cells.
    pub special: Handle<ColorMaterial>,
    /// Fill for the player token.
    pub player: Handle<ColorMaterial>,
}

impl ToneMaterials {
    /// Handle for a derived cell tone.
    pub fn for_tone(&self, tone: Tone) -> Handle<ColorMaterial> {
        match tone {
            Tone::Positive => self.positive.clone(),
            Tone::Negative => self.negative.clone(),
            Tone::Special => self.special.clone(),
        }
    }
}

/// Current presentation scale of the board root, updated on window resize.
///
/// Pointer input divides by this to get back into base-layout coordinates.
#[derive(Resource, Reflect)]
pub struct BoardLayout {
    /// Uniform scale applied to [`BoardRoot`].
    pub scale: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Repaint request for one cell (fill tone + value label).
#[derive(Message)]
pub struct RefreshCell {
    /// Which cell to repaint.
    pub hex: Hex,
}

/// Reposition the player token and rewrite its health label.
#[derive(Message)]
pub struct RefreshPlayer;

/// The last move dropped health to ≤ 0; the core already respawned the
/// player. The UI owes the user an acknowledgment before input resumes.
#[derive(Message)]
pub struct PlayerDied;

/// Bundled writers for everything a move outcome can fan out into.
#[derive(SystemParam)]
pub struct RepaintWriters<'w> {
    /// Per-cell repaint requests.
    pub cells: MessageWriter<'w, RefreshCell>,
    /// Player token reposition/relabel requests.
    pub player: MessageWriter<'w, RefreshPlayer>,
    /// Death notifications.
    pub deaths: MessageWriter<'w, PlayerDied>,
}
