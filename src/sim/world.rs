//! Static level data
//!
//! A `World` is validated once at construction and never mutated afterwards.
//! Sessions copy the collectible lists out of it and consume their own copies,
//! so a restart can start again from the same pristine world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Malformed level data, reported when the world is built
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// World width is non-finite or not positive
    BadWorldWidth(f32),
    /// Solid at this index has zero or negative size
    EmptySolid(usize),
    /// Solid at this index extends outside `[0, world_width]`
    SolidOutOfBounds(usize),
    /// Player spawn rectangle overlaps the solid at this index
    SpawnInsideSolid(usize),
    /// Enemy spawn at this index overlaps a solid
    EnemyInsideSolid(usize),
    /// Goal region has zero or negative size
    EmptyGoal,
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::BadWorldWidth(w) => write!(f, "Invalid world width: {}", w),
            LevelError::EmptySolid(i) => write!(f, "Solid {} has no area", i),
            LevelError::SolidOutOfBounds(i) => write!(f, "Solid {} lies outside the world", i),
            LevelError::SpawnInsideSolid(i) => write!(f, "Player spawn overlaps solid {}", i),
            LevelError::EnemyInsideSolid(i) => write!(f, "Enemy spawn {} overlaps a solid", i),
            LevelError::EmptyGoal => write!(f, "Goal region has no area"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Raw level description, checked by [`World::new`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub width: f32,
    /// Solids in resolution order
    pub solids: Vec<Rect>,
    /// Coin top-left positions
    pub coins: Vec<Vec2>,
    /// Power-up top-left positions
    pub powerups: Vec<Vec2>,
    /// Enemy top-left spawn positions
    pub enemies: Vec<Vec2>,
    pub goal: Rect,
    /// Player top-left spawn position
    pub spawn: Vec2,
}

impl LevelLayout {
    /// The built-in level: four ground segments separated by pits, six floating
    /// ledges, coin rows above the ledges, two power-ups and four patrolling enemies.
    pub fn standard() -> Self {
        let width = 4800.0;
        let ground_y = SCREEN_HEIGHT - 80.0;
        let ground_h = 120.0;

        let mut solids: Vec<Rect> = [
            (0.0, 1400.0),
            (1600.0, 2450.0),
            (2700.0, 3550.0),
            (3800.0, width),
        ]
        .iter()
        .map(|&(start, end)| Rect::new(start, ground_y, end - start, ground_h))
        .collect();

        solids.extend([
            Rect::new(520.0, 340.0, 240.0, 28.0),
            Rect::new(980.0, 280.0, 200.0, 28.0),
            Rect::new(1880.0, 320.0, 240.0, 28.0),
            Rect::new(2220.0, 260.0, 200.0, 28.0),
            Rect::new(3080.0, 320.0, 240.0, 28.0),
            Rect::new(4120.0, 300.0, 240.0, 28.0),
        ]);

        let coins = [
            (560.0, 300.0),
            (620.0, 300.0),
            (680.0, 300.0),
            (1020.0, 240.0),
            (1080.0, 240.0),
            (1940.0, 280.0),
            (2000.0, 280.0),
            (2280.0, 220.0),
            (3140.0, 280.0),
            (3200.0, 280.0),
            (4180.0, 260.0),
            (4240.0, 260.0),
        ]
        .iter()
        .map(|&(x, y)| Vec2::new(x, y))
        .collect();

        let powerups = vec![Vec2::new(640.0, 318.0), Vec2::new(1980.0, 298.0)];

        let enemies = [760.0, 1760.0, 2920.0, 4060.0]
            .iter()
            .map(|&x| Vec2::new(x, ground_y - ENEMY_HEIGHT))
            .collect();

        Self {
            width,
            solids,
            coins,
            powerups,
            enemies,
            goal: Rect::new(width - 120.0, ground_y - 140.0, 20.0, 140.0),
            spawn: Vec2::new(120.0, ground_y - PLAYER_HEIGHT),
        }
    }
}

/// Validated, immutable level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: f32,
    solids: Vec<Rect>,
    coins: Vec<Rect>,
    powerups: Vec<Rect>,
    enemy_spawns: Vec<Vec2>,
    goal: Rect,
    spawn: Vec2,
}

impl World {
    /// Validate a layout and build the world from it
    pub fn new(layout: LevelLayout) -> Result<Self, LevelError> {
        if !layout.width.is_finite() || layout.width <= 0.0 {
            return Err(LevelError::BadWorldWidth(layout.width));
        }

        for (i, solid) in layout.solids.iter().enumerate() {
            if solid.is_degenerate() {
                return Err(LevelError::EmptySolid(i));
            }
            if solid.left() < 0.0 || solid.right() > layout.width {
                return Err(LevelError::SolidOutOfBounds(i));
            }
        }

        if layout.goal.is_degenerate() {
            return Err(LevelError::EmptyGoal);
        }

        let spawn_rect = Rect::at(layout.spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT));
        if let Some(i) = layout.solids.iter().position(|s| spawn_rect.intersects(s)) {
            return Err(LevelError::SpawnInsideSolid(i));
        }

        for (i, &pos) in layout.enemies.iter().enumerate() {
            let rect = Rect::at(pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
            if rect.intersects_any(&layout.solids) {
                return Err(LevelError::EnemyInsideSolid(i));
            }
        }

        let coins = layout
            .coins
            .iter()
            .map(|&p| Rect::at(p, Vec2::splat(COIN_SIZE)))
            .collect();
        let powerups = layout
            .powerups
            .iter()
            .map(|&p| Rect::at(p, Vec2::splat(POWERUP_SIZE)))
            .collect();

        Ok(Self {
            width: layout.width,
            solids: layout.solids,
            coins,
            powerups,
            enemy_spawns: layout.enemies,
            goal: layout.goal,
            spawn: layout.spawn,
        })
    }

    /// The built-in level
    pub fn standard() -> Result<Self, LevelError> {
        Self::new(LevelLayout::standard())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Solids in the fixed order collision correction walks them
    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    /// Coins present at session start
    pub fn coins(&self) -> &[Rect] {
        &self.coins
    }

    /// Power-ups present at session start
    pub fn powerups(&self) -> &[Rect] {
        &self.powerups
    }

    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    pub fn goal(&self) -> Rect {
        self.goal
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_level_is_valid() {
        let world = World::standard().unwrap();
        assert_eq!(world.width(), 4800.0);
        assert_eq!(world.solids().len(), 10);
        assert_eq!(world.coins().len(), 12);
        assert_eq!(world.powerups().len(), 2);
        assert_eq!(world.enemy_spawns().len(), 4);
        assert_eq!(world.spawn(), Vec2::new(120.0, 432.0));
    }

    #[test]
    fn test_rejects_zero_size_solid() {
        let mut layout = LevelLayout::standard();
        layout.solids.push(Rect::new(100.0, 100.0, 0.0, 10.0));
        assert_eq!(World::new(layout).unwrap_err(), LevelError::EmptySolid(10));
    }

    #[test]
    fn test_rejects_spawn_inside_solid() {
        let mut layout = LevelLayout::standard();
        layout.spawn = Vec2::new(120.0, 450.0);
        assert_eq!(World::new(layout).unwrap_err(), LevelError::SpawnInsideSolid(0));
    }

    #[test]
    fn test_rejects_solid_outside_world() {
        let mut layout = LevelLayout::standard();
        layout.solids.push(Rect::new(4700.0, 100.0, 200.0, 10.0));
        assert_eq!(
            World::new(layout).unwrap_err(),
            LevelError::SolidOutOfBounds(10)
        );
    }

    #[test]
    fn test_rejects_bad_width_and_goal() {
        let mut layout = LevelLayout::standard();
        layout.width = f32::NAN;
        assert!(matches!(
            World::new(layout),
            Err(LevelError::BadWorldWidth(_))
        ));

        let mut layout = LevelLayout::standard();
        layout.goal = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(World::new(layout).unwrap_err(), LevelError::EmptyGoal);
    }

    #[test]
    fn test_rejects_enemy_inside_solid() {
        let mut layout = LevelLayout::standard();
        layout.enemies.push(Vec2::new(600.0, 470.0));
        assert_eq!(
            World::new(layout).unwrap_err(),
            LevelError::EnemyInsideSolid(4)
        );
    }
}
