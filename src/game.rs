//! The hex board game: grid store, movement rules, and their presentation.
//!
//! The core (`board`, `rules`) is plain data with no ECS dependencies; the
//! `systems` module adapts pointer/resize input into it and repaints tiles
//! from the outcomes it returns.

mod board;
mod entities;
mod rules;
mod systems;

use bevy::prelude::*;

use crate::AppState;

/// Nested configuration for the game, inserted as a resource by [`GamePlugin`].
#[derive(Resource, Clone, Debug, Default, Reflect)]
pub struct GameConfig {
    /// Board generation settings.
    pub board: BoardSettings,
    /// Movement and health rules.
    pub rules: RuleSettings,
    /// Colors and base layout size.
    pub theme: ThemeSettings,
    /// Fixed RNG seed for reproducible boards; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Board generation parameters.
#[derive(Clone, Debug, Reflect)]
pub struct BoardSettings {
    /// Number of hex rings around the origin.
    pub radius: u32,
    /// Probability that a generated cell is a special trigger cell.
    pub special_chance: f64,
    /// Cell values are drawn uniformly from `[-value_spread, value_spread)`.
    pub value_spread: i32,
}

/// Movement and health rules.
#[derive(Clone, Debug, Reflect)]
pub struct RuleSettings {
    /// Health at game start and after each respawn.
    pub start_health: i32,
    /// Leaving a cell decays it by a uniform draw in `[1, decay_max]`.
    pub decay_max: i32,
    /// Value every cell takes when a special cell detonates.
    pub reset_value: i32,
}

/// Palette and base layout size.
#[derive(Clone, Debug, Reflect)]
pub struct ThemeSettings {
    /// Hex circumradius of the base layout; resize scales relative to this.
    pub hex_size: f32,
    /// Fill for strictly positive cells.
    pub positive: Color,
    /// Fill for zero/negative cells.
    pub negative: Color,
    /// Highlight fill for un-detonated special cells.
    pub special: Color,
    /// Fill for the player token.
    pub player: Color,
    /// Label text color.
    pub label: Color,
    /// Window clear color.
    pub background: Color,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            radius: 8,
            special_chance: 0.05,
            value_spread: 100,
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            start_health: 75,
            decay_max: 100,
            reset_value: 10,
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            hex_size: 40.0,
            positive: Color::srgb_u8(0x00, 0xaa, 0x00),
            negative: Color::srgb_u8(0xaa, 0x00, 0x00),
            special: Color::srgb_u8(0x99, 0xcc, 0xff),
            player: Color::srgb_u8(0x00, 0x00, 0xff),
            label: Color::WHITE,
            background: Color::srgb_u8(0x33, 0x33, 0x33),
        }
    }
}

/// Game plugin: board spawning at startup, input/repaint/resize at runtime.
pub struct GamePlugin(pub GameConfig);

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameConfig>()
            .register_type::<entities::CellTile>()
            .register_type::<entities::ValueLabel>()
            .register_type::<entities::PlayerToken>()
            .register_type::<entities::BoardRoot>()
            .register_type::<entities::DeathNotice>()
            .register_type::<entities::BoardLayout>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.theme.background))
            .init_resource::<entities::BoardLayout>()
            .add_message::<entities::RefreshCell>()
            .add_message::<entities::RefreshPlayer>()
            .add_message::<entities::PlayerDied>()
            .add_systems(Startup, systems::spawn_board)
            .add_systems(
                Update,
                systems::handle_clicks.run_if(in_state(AppState::Playing)),
            )
            .add_systems(
                Update,
                (systems::refresh_cells, systems::refresh_player)
                    .after(systems::handle_clicks),
            )
            .add_systems(
                Update,
                systems::show_death_notice.after(systems::handle_clicks),
            )
            .add_systems(
                Update,
                systems::dismiss_death_notice.run_if(in_state(AppState::Dead)),
            )
            .add_systems(Update, systems::fit_board_to_window);
    }
}
