use bevy::prelude::*;
use bevy::window::WindowResized;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::GameConfig;
use super::board::Board;
use super::entities::{
    BoardLayout, BoardRoot, CellEntities, CellTile, DeathNotice, PlayerDied, PlayerToken,
    RefreshCell, RefreshPlayer, RepaintWriters, Session, ToneMaterials, ValueLabel,
};
use super::rules::{Game, MoveOutcome};
use crate::AppState;
use crate::math;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the camera, tone materials, one tile + label per cell, and the
/// player token, and seeds the [`Session`].
pub fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    cfg: Res<GameConfig>,
) {
    commands.spawn((Name::new("Camera"), Camera2d));

    let tones = ToneMaterials {
        positive: materials.add(ColorMaterial::from_color(cfg.theme.positive)),
        negative: materials.add(ColorMaterial::from_color(cfg.theme.negative)),
        special: materials.add(ColorMaterial::from_color(cfg.theme.special)),
        player: materials.add(ColorMaterial::from_color(cfg.theme.player)),
    };

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let board = Board::generate(&cfg.board, &mut rng);
    info!(
        "generated board: {} cells at radius {}",
        board.cell_count(),
        board.radius()
    );

    let size = cfg.theme.hex_size;
    // Slightly undersized so the background shows through as cell borders.
    let tile_mesh = meshes.add(RegularPolygon::new(size * 0.95, 6));
    let label_font = TextFont {
        font_size: 16.0,
        ..default()
    };

    let root = commands
        .spawn((
            BoardRoot,
            Name::new("BoardRoot"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut map = bevy::platform::collections::HashMap::new();
    for (&hex, cell) in board.iter() {
        let pos = math::axial_to_planar(hex, size);
        let label = commands
            .spawn((
                ValueLabel,
                Text2d::new(cell.label()),
                label_font.clone(),
                TextColor(cfg.theme.label),
                Transform::from_xyz(0.0, 0.0, 1.0),
            ))
            .id();
        let tile = commands
            .spawn((
                CellTile { hex, label },
                Name::new(format!("Cell({},{})", hex.x, hex.y)),
                Mesh2d(tile_mesh.clone()),
                MeshMaterial2d(tones.for_tone(cell.tone())),
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ))
            .id();
        commands.entity(tile).add_child(label);
        commands.entity(root).add_child(tile);
        map.insert(hex, tile);
    }

    let game = Game::new(board, cfg.rules.clone());
    let player_pos = math::axial_to_planar(game.player().position, size);
    let health_label = commands
        .spawn((
            ValueLabel,
            Text2d::new(game.player().health.to_string()),
            label_font,
            TextColor(cfg.theme.label),
            Transform::from_xyz(0.0, 0.0, 1.0),
        ))
        .id();
    let token = commands
        .spawn((
            PlayerToken {
                label: health_label,
            },
            Name::new("Player"),
            Mesh2d(tile_mesh.clone()),
            MeshMaterial2d(tones.player.clone()),
            Transform::from_xyz(player_pos.x, player_pos.y, 2.0),
        ))
        .id();
    commands.entity(token).add_child(health_label);
    commands.entity(root).add_child(token);

    commands.insert_resource(CellEntities { map });
    commands.insert_resource(tones);
    commands.insert_resource(Session { game, rng });
}

// ── Update: input ───────────────────────────────────────────────────

/// Pointer adapter: turns a left-button press into a move attempt and fans
/// the outcome out as repaint messages.
///
/// Runs only in [`AppState::Playing`], so presses are processed one at a
/// time, to completion, and never while the death notice is up.
pub fn handle_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut session: ResMut<Session>,
    cfg: Res<GameConfig>,
    layout: Res<BoardLayout>,
    mut out: RepaintWriters,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else { return };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = camera_q.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(cam_tf, cursor) else {
        return;
    };

    // Undo the resize scale to get back into base-layout coordinates.
    let target = math::planar_to_axial(world / layout.scale, cfg.theme.hex_size);

    let Session { game, rng } = &mut *session;
    match game.attempt_move(target, rng) {
        MoveOutcome::Rejected => {
            debug!("rejected move to ({},{})", target.x, target.y);
        }
        MoveOutcome::Moved { vacated } => {
            out.cells.write(RefreshCell { hex: vacated });
            out.player.write(RefreshPlayer);
        }
        MoveOutcome::Died => {
            info!("player died; respawned at the origin");
            out.player.write(RefreshPlayer);
            out.deaths.write(PlayerDied);
        }
        MoveOutcome::Detonated { .. } => {
            info!(
                "special cell detonated: board reset to {}",
                cfg.rules.reset_value
            );
            for (&hex, _) in game.board().iter() {
                out.cells.write(RefreshCell { hex });
            }
            out.player.write(RefreshPlayer);
        }
    }
}

// ── Update: repainting ──────────────────────────────────────────────

/// Applies [`RefreshCell`] requests: swap the tile's material handle by its
/// derived tone and rewrite the value label. Entity identity is preserved.
pub fn refresh_cells(
    mut messages: MessageReader<RefreshCell>,
    session: Res<Session>,
    cell_entities: Res<CellEntities>,
    tones: Res<ToneMaterials>,
    mut tiles: Query<(&CellTile, &mut MeshMaterial2d<ColorMaterial>)>,
    mut labels: Query<&mut Text2d, With<ValueLabel>>,
) {
    for msg in messages.read() {
        let Some(&entity) = cell_entities.map.get(&msg.hex) else {
            continue;
        };
        let Some(cell) = session.game.board().get(msg.hex) else {
            continue;
        };
        let Ok((tile, mut material)) = tiles.get_mut(entity) else {
            continue;
        };
        material.0 = tones.for_tone(cell.tone());
        if let Ok(mut text) = labels.get_mut(tile.label) {
            text.0 = cell.label();
        }
    }
}

/// Applies [`RefreshPlayer`]: move the token to the player's cell and
/// rewrite the health label.
pub fn refresh_player(
    mut messages: MessageReader<RefreshPlayer>,
    session: Res<Session>,
    cfg: Res<GameConfig>,
    mut tokens: Query<(&PlayerToken, &mut Transform)>,
    mut labels: Query<&mut Text2d, With<ValueLabel>>,
) {
    if messages.is_empty() {
        return;
    }
    messages.clear();

    let Ok((token, mut transform)) = tokens.single_mut() else {
        return;
    };
    let player = session.game.player();
    let pos = math::axial_to_planar(player.position, cfg.theme.hex_size);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
    if let Ok(mut text) = labels.get_mut(token.label) {
        text.0 = player.health.to_string();
    }
}

// ── Update: death notice ────────────────────────────────────────────

/// Puts up the "You died!" overlay and halts board input by switching to
/// [`AppState::Dead`]. The core has already respawned the player.
pub fn show_death_notice(
    mut deaths: MessageReader<PlayerDied>,
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut next: ResMut<NextState<AppState>>,
) {
    if deaths.is_empty() {
        return;
    }
    deaths.clear();

    commands.spawn((
        DeathNotice,
        Name::new("DeathNotice"),
        Text2d::new("You died!"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(cfg.theme.label),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
    next.set(AppState::Dead);
}

/// Any click or key acknowledges the notice and resumes play. The
/// acknowledging press is consumed here; it never reaches the board.
pub fn dismiss_death_notice(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    notices: Query<Entity, With<DeathNotice>>,
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
) {
    let acknowledged =
        mouse.just_pressed(MouseButton::Left) || keys.get_just_pressed().next().is_some();
    if !acknowledged {
        return;
    }
    for notice in &notices {
        commands.entity(notice).despawn();
    }
    next.set(AppState::Playing);
}

// ── Update: resize ──────────────────────────────────────────────────

/// Fits the board to the viewport by rescaling the root entity. Presentation
/// only; game state is never touched. Coalesces bursts of resize messages.
pub fn fit_board_to_window(
    mut resizes: MessageReader<WindowResized>,
    cfg: Res<GameConfig>,
    mut layout: ResMut<BoardLayout>,
    mut roots: Query<&mut Transform, With<BoardRoot>>,
) {
    let Some(resize) = resizes.read().last() else {
        return;
    };
    let fitted = math::fit_hex_size(resize.width, resize.height, cfg.board.radius);
    layout.scale = fitted / cfg.theme.hex_size;
    if let Ok(mut transform) = roots.single_mut() {
        transform.scale = Vec3::splat(layout.scale);
    }
    debug!(
        "viewport {}x{} → hex size {fitted}",
        resize.width, resize.height
    );
}
