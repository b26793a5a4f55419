//! Rendering plugin - draws the session snapshot with immediate-mode shapes,
//! plus camera shake and the free-roam follow camera.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::ecosystem::{ActiveEcosystem, MAX_FEAR};
use crate::effects::{Particle, ParticleSystem, Tint};
use crate::game::{
    ARENA_BORDER_COLOR, ARENA_COLOR, BACKGROUND_COLOR, CELEBRATION_COLORS, CELL_SIZE,
    CORNER_RADIUS, CameraShake, DEATH_COLOR, Direction, FOOD_COLOR, FREE_SNAKE_COLORS,
    GRASS_COLOR, GRID_LINE_COLOR, GameEvent, GameSettings, GridBounds, OBSTACLE_BOX_COLOR,
    OBSTACLE_CORNER_COLOR, OBSTACLE_CROSS_COLOR, OBSTACLE_LINE_COLOR, POWER_UP_LIFETIME,
    PREY_COLORS, Position, SNAKE_HEAD_COLOR, SNAKE_INVINCIBLE_COLOR, Z_BACKGROUND, Z_FOOD,
    Z_GRID, Z_OBSTACLE, Z_PARTICLES, Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
};
use crate::items::{ObstaclePattern, PowerUpKind};
use crate::session::{ActiveSession, Snapshot};

/// Seconds before expiry when power-ups start blinking.
const BLINK_WINDOW: f32 = 3.0;
/// Spacing of the decorative grass tufts in the free-roam world.
const TERRAIN_STEP: f32 = 40.0;
const CAMERA_FOLLOW: f32 = 0.05;

/// Plugin for drawing and camera effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND_COLOR))
            .init_resource::<CameraShake>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    (
                        trigger_camera_shake,
                        camera_shake_system,
                        draw_arena,
                        draw_particles,
                    )
                        .chain()
                        .run_if(resource_exists::<ActiveSession>),
                    (follow_snake, draw_ecosystem)
                        .chain()
                        .run_if(resource_exists::<ActiveEcosystem>),
                ),
            );
    }
}

/// Camera with HDR and bloom so the additive shapes glow.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.3,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));
}

/// Converts a point in grid units to world space, centring the arena.
pub fn grid_to_world(point: Vec2, bounds: GridBounds) -> Vec2 {
    (point - Vec2::new(bounds.width as f32, bounds.height as f32) / 2.0) * CELL_SIZE
}

fn cell_to_world(cell: Position, bounds: GridBounds) -> Vec2 {
    grid_to_world(cell.center(), bounds)
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::SpeedBoost => Color::srgb(1.0, 1.0, 0.0),
        PowerUpKind::SlowDown => Color::srgb(0.12, 0.56, 1.0),
        PowerUpKind::Grow => Color::srgb(0.22, 1.0, 0.08),
        PowerUpKind::Shrink => Color::srgb(1.0, 0.65, 0.0),
        PowerUpKind::Invincibility => SNAKE_INVINCIBLE_COLOR,
        PowerUpKind::DoublePoints => Color::srgb(1.0, 0.84, 0.0),
    }
}

fn obstacle_color(pattern: ObstaclePattern) -> Color {
    match pattern {
        ObstaclePattern::Line => OBSTACLE_LINE_COLOR,
        ObstaclePattern::Box => OBSTACLE_BOX_COLOR,
        ObstaclePattern::Cross => OBSTACLE_CROSS_COLOR,
        ObstaclePattern::Corner => OBSTACLE_CORNER_COLOR,
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Food => FOOD_COLOR,
        Tint::PowerUp(kind) => power_up_color(kind),
        Tint::Death => DEATH_COLOR,
        Tint::Celebration(index) => {
            CELEBRATION_COLORS[index as usize % CELEBRATION_COLORS.len()]
        }
        Tint::Prey => PREY_COLORS[2],
    }
}

/// Food grows and shrinks on a 0.8 s cycle.
fn food_pulse(elapsed: f32) -> f32 {
    1.0 + 0.15 * (elapsed * TAU / 0.8).sin()
}

/// Power-ups blink during their last seconds on the board.
fn power_up_visible(age: f32, elapsed: f32) -> bool {
    age < POWER_UP_LIFETIME - BLINK_WINDOW || (elapsed * 8.0) as i32 % 2 == 0
}

/// System to draw the arena, items and snake from the session snapshot.
fn draw_arena(mut painter: ShapePainter, session: Res<ActiveSession>, settings: Res<GameSettings>) {
    let snapshot = session.snapshot();
    let bounds = snapshot.bounds;
    let arena = Vec2::new(bounds.width as f32, bounds.height as f32) * CELL_SIZE;

    painter.reset();
    painter.set_translation(Vec3::new(0.0, 0.0, Z_BACKGROUND));
    painter.color = ARENA_COLOR;
    painter.rect(arena);

    painter.hollow = true;
    painter.thickness = 4.0;
    painter.alpha_mode = ShapeAlphaMode::Add;
    painter.color = ARENA_BORDER_COLOR;
    painter.rect(arena + Vec2::splat(4.0));

    if settings.show_grid {
        draw_grid(&mut painter, arena, bounds);
    }

    painter.reset();
    painter.corner_radii = Vec4::splat(CORNER_RADIUS / (CELL_SIZE / 2.0));
    for obstacle in snapshot.obstacles {
        let size = Vec2::new(obstacle.width as f32, obstacle.height as f32);
        let origin = Vec2::new(obstacle.origin.x as f32, obstacle.origin.y as f32);
        let center = grid_to_world(origin + size / 2.0, bounds);
        painter.set_translation(center.extend(Z_OBSTACLE));
        painter.color = obstacle_color(obstacle.pattern);
        painter.rect(size * CELL_SIZE);
    }

    draw_items(&mut painter, &snapshot);
    draw_snake(&mut painter, &snapshot);
}

fn draw_grid(painter: &mut ShapePainter, arena: Vec2, bounds: GridBounds) {
    painter.reset();
    painter.thickness = 1.0;
    painter.color = GRID_LINE_COLOR;
    let half = arena / 2.0;
    for x in 1..bounds.width {
        let px = x as f32 * CELL_SIZE - half.x;
        painter.line(Vec3::new(px, -half.y, Z_GRID), Vec3::new(px, half.y, Z_GRID));
    }
    for y in 1..bounds.height {
        let py = y as f32 * CELL_SIZE - half.y;
        painter.line(Vec3::new(-half.x, py, Z_GRID), Vec3::new(half.x, py, Z_GRID));
    }
}

fn draw_items(painter: &mut ShapePainter, snapshot: &Snapshot) {
    let bounds = snapshot.bounds;
    painter.reset();

    if let Some(food) = snapshot.food {
        let center = cell_to_world(food.position, bounds);
        painter.set_translation(center.extend(Z_FOOD));
        painter.alpha_mode = ShapeAlphaMode::Add;
        painter.color = FOOD_COLOR.with_alpha(0.3);
        painter.circle(CELL_SIZE * 0.7 * food_pulse(snapshot.elapsed));
        painter.alpha_mode = ShapeAlphaMode::Blend;
        painter.color = FOOD_COLOR;
        painter.circle(CELL_SIZE * 0.4 * food_pulse(snapshot.elapsed));
    }

    for power_up in snapshot.power_ups {
        if !power_up_visible(power_up.age(snapshot.elapsed), snapshot.elapsed) {
            continue;
        }
        let center = cell_to_world(power_up.position, bounds);
        let color = power_up_color(power_up.kind);
        painter.set_translation(center.extend(Z_FOOD));
        painter.hollow = true;
        painter.thickness = 2.0;
        painter.color = color;
        painter.circle(CELL_SIZE * 0.45);
        painter.hollow = false;
        painter.color = color.with_alpha(0.6);
        painter.circle(CELL_SIZE * 0.25);
    }
}

fn draw_snake(painter: &mut ShapePainter, snapshot: &Snapshot) {
    let bounds = snapshot.bounds;
    let snake = snapshot.snake;
    // Blink between the two head colours while invincible.
    let color = if snapshot.invincible && (snapshot.elapsed * 6.0) as i32 % 2 == 0 {
        SNAKE_INVINCIBLE_COLOR
    } else {
        SNAKE_HEAD_COLOR
    };

    painter.reset();
    painter.corner_radii = Vec4::splat(CORNER_RADIUS / (CELL_SIZE / 2.0));
    let len = snake.len().max(1) as f32;
    for (i, &segment) in snake.segments().enumerate().skip(1) {
        let center = cell_to_world(segment, bounds);
        painter.set_translation(center.extend(Z_SNAKE_SEGMENT));
        painter.color = color.with_alpha(1.0 - 0.6 * i as f32 / len);
        painter.rect(Vec2::splat(CELL_SIZE * 0.9));
    }

    let head = cell_to_world(snake.head(), bounds);
    let rotation = match snake.direction() {
        Direction::Right => 0.0,
        Direction::Up => FRAC_PI_2,
        Direction::Left => PI,
        Direction::Down => -FRAC_PI_2,
    };

    painter.set_translation(head.extend(Z_SNAKE_HEAD - 0.1));
    painter.corner_radii = Vec4::ZERO;
    painter.alpha_mode = ShapeAlphaMode::Add;
    painter.color = color.with_alpha(0.25);
    painter.circle(CELL_SIZE * 0.8);

    painter.alpha_mode = ShapeAlphaMode::Blend;
    painter.corner_radii = Vec4::splat(CORNER_RADIUS / (CELL_SIZE / 2.0));
    painter.set_translation(head.extend(Z_SNAKE_HEAD));
    painter.set_rotation(Quat::from_rotation_z(rotation));
    painter.color = color;
    painter.rect(Vec2::splat(CELL_SIZE * 0.9));

    painter.corner_radii = Vec4::ZERO;
    painter.color = Color::BLACK;
    for side in [1.0, -1.0] {
        painter.set_translation(head.extend(Z_SNAKE_HEAD + 0.1));
        painter.translate(Vec3::new(CELL_SIZE * 0.15, side * CELL_SIZE * 0.15, 0.0));
        painter.circle(CELL_SIZE * 0.08);
    }
}

fn draw_particle(painter: &mut ShapePainter, particle: &Particle, position: Vec2, radius: f32) {
    painter.set_translation(position.extend(Z_PARTICLES));
    painter.color = tint_color(particle.tint).with_alpha(particle.fade());
    painter.circle(radius);
}

/// System to draw arcade particles, which live in grid units.
fn draw_particles(mut painter: ShapePainter, session: Res<ActiveSession>) {
    let snapshot = session.snapshot();
    painter.reset();
    painter.alpha_mode = ShapeAlphaMode::Add;
    for particle in snapshot.particles.iter() {
        let position = grid_to_world(particle.position, snapshot.bounds);
        draw_particle(&mut painter, particle, position, particle.size * CELL_SIZE);
    }
}

/// System to shake the camera on deaths and level-ups.
fn trigger_camera_shake(
    mut events: MessageReader<GameEvent>,
    settings: Res<GameSettings>,
    mut camera_shake: ResMut<CameraShake>,
) {
    for event in events.read() {
        if !settings.screen_shake {
            continue;
        }
        match event {
            GameEvent::SnakeDied { .. } => camera_shake.start(0.5, 8.0),
            GameEvent::LevelUp { .. } => camera_shake.start(0.3, 4.0),
            _ => {}
        }
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if !camera_shake.is_active() {
        return;
    }
    camera_shake.timer.tick(time.delta());

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        if camera_shake.timer.is_finished() {
            camera_transform.translation.x = 0.0;
            camera_transform.translation.y = 0.0;
        } else {
            let decay = 1.0 - camera_shake.timer.fraction();
            let mut rng = rand::rng();
            let shake_x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
            let shake_y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
            camera_transform.translation.x = shake_x;
            camera_transform.translation.y = shake_y;
        }
    }
}

/// System to ease the camera toward the free-roam snake's head.
fn follow_snake(
    time: Res<Time>,
    ecosystem: Res<ActiveEcosystem>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let frames = time.delta_secs() * 60.0;
    let ease = 1.0 - (1.0 - CAMERA_FOLLOW).powf(frames);
    let target = ecosystem.snake().head().position;
    let current = camera_transform.translation.truncate();
    let next = current.lerp(target, ease);
    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}

/// System to draw the free-roam world: terrain, prey, snake and particles.
fn draw_ecosystem(
    mut painter: ShapePainter,
    ecosystem: Res<ActiveEcosystem>,
    windows: Query<&Window>,
    camera_query: Query<&Transform, With<Camera2d>>,
) {
    let view = windows
        .iter()
        .next()
        .map(|window| window.size())
        .unwrap_or(Vec2::new(800.0, 600.0));
    let camera = camera_query
        .iter()
        .next()
        .map(|transform| transform.translation.truncate())
        .unwrap_or_default();

    painter.reset();
    painter.color = GRASS_COLOR;
    painter.set_translation(camera.extend(Z_BACKGROUND));
    painter.rect(view);

    // Tufts sit on a fixed world lattice so they scroll with the camera.
    painter.color = GRASS_COLOR.lighter(0.05);
    let start = ((camera - view / 2.0) / TERRAIN_STEP).floor() * TERRAIN_STEP;
    let mut x = start.x;
    while x < camera.x + view.x / 2.0 + TERRAIN_STEP {
        let mut y = start.y;
        while y < camera.y + view.y / 2.0 + TERRAIN_STEP {
            painter.set_translation(Vec3::new(x, y, Z_GRID));
            painter.circle(2.0);
            y += TERRAIN_STEP;
        }
        x += TERRAIN_STEP;
    }

    for prey in ecosystem.prey() {
        painter.set_translation(prey.position.extend(Z_FOOD));
        if prey.fear > 10.0 {
            painter.hollow = true;
            painter.thickness = 2.0;
            painter.color = Color::srgb(prey.fear / MAX_FEAR, 0.0, 0.0);
            painter.circle(prey.size + 3.0);
            painter.hollow = false;
        }
        let color = PREY_COLORS[prey.shade % PREY_COLORS.len()];
        painter.color = color;
        painter.circle(prey.size);
        painter.translate(Vec3::new(-2.0, 2.0, 0.1));
        painter.color = color.lighter(0.15);
        painter.circle(prey.size / 2.0);
    }

    let segments = ecosystem.snake().segments();
    for (i, segment) in segments.iter().enumerate().rev() {
        let z = Z_SNAKE_SEGMENT + 0.001 * (segments.len() - i) as f32;
        painter.set_translation(segment.position.extend(z));
        painter.color = FREE_SNAKE_COLORS[i % FREE_SNAKE_COLORS.len()];
        painter.circle(segment.width / 2.0);
    }

    let head = ecosystem.snake().head();
    painter.set_translation(head.position.extend(Z_SNAKE_HEAD));
    painter.set_rotation(Quat::from_rotation_z(head.angle));
    painter.color = Color::srgb(1.0, 0.85, 0.0);
    for side in [1.0, -1.0] {
        painter.set_translation(head.position.extend(Z_SNAKE_HEAD));
        painter.translate(Vec3::new(head.width * 0.25, side * head.width * 0.2, 0.0));
        painter.circle(2.5);
    }

    painter.reset();
    painter.alpha_mode = ShapeAlphaMode::Add;
    draw_free_particles(&mut painter, ecosystem.particles());
}

fn draw_free_particles(painter: &mut ShapePainter, particles: &ParticleSystem) {
    for particle in particles.iter() {
        draw_particle(painter, particle, particle.position, particle.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_centres_arena() {
        let bounds = GridBounds::new(40, 30);
        assert_eq!(grid_to_world(Vec2::new(20.0, 15.0), bounds), Vec2::ZERO);
        assert_eq!(
            cell_to_world(Position::new(0, 0), bounds),
            Vec2::new(-19.5, -14.5) * CELL_SIZE
        );
    }

    #[test]
    fn test_power_ups_blink_before_expiry() {
        assert!(power_up_visible(1.0, 0.0));
        assert!(power_up_visible(1.0, 0.2));
        let late = POWER_UP_LIFETIME - 1.0;
        assert!(power_up_visible(late, 0.0));
        assert!(!power_up_visible(late, 0.2));
    }

    #[test]
    fn test_food_pulse_range() {
        for step in 0..100 {
            let scale = food_pulse(step as f32 * 0.01);
            assert!((0.84..=1.16).contains(&scale));
        }
    }
}
