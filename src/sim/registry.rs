//! Entity ownership, groups and spawn/despawn lifecycle
//!
//! The registry owns every live entity and hands out monotonically
//! increasing ids, so vec order doubles as stable id order for
//! deterministic iteration. Each entity belongs to `All` plus exactly one
//! specialized group; removal leaves every group at once.

use glam::Vec2;

use super::state::{Bullet, DroppedWeapon, Enemy, Player};
use crate::config::Tuning;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::map::TileGrid;

/// Id reserved for the player, which is never despawned
pub const PLAYER_ID: u32 = 0;

/// Entity group membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// Everything that updates and draws, dead enemies included
    All,
    /// Live enemies only; drives the win-condition count
    Enemies,
    Bullets,
    Drops,
}

/// Owner of all live entities
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    pub player: Player,
    /// Enemies stay here after death for rendering; only live ones count
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub drops: Vec<DroppedWeapon>,
    next_id: u32,
}

impl EntityRegistry {
    /// Build a registry seeded from the map's spawn markers
    pub fn seeded(grid: &TileGrid, tuning: &Tuning) -> Self {
        let player_pos = grid.player_spawn().unwrap_or_else(|| {
            log::warn!("Map has no player spawn, using screen center");
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
        });

        let mut registry = Self {
            player: Player::new(player_pos, tuning.ammo_count),
            enemies: Vec::new(),
            bullets: Vec::new(),
            drops: Vec::new(),
            next_id: PLAYER_ID + 1,
        };
        for &pos in grid.enemy_spawns() {
            registry.spawn_enemy(pos, tuning.enemy_reaction_time);
        }
        registry
    }

    /// Clear all groups and re-seed from the spawn markers
    pub fn reset(&mut self, grid: &TileGrid, tuning: &Tuning) {
        *self = Self::seeded(grid, tuning);
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, pos: Vec2, reaction_time: u32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, reaction_time));
        id
    }

    pub fn spawn_bullet(&mut self, bullet: Bullet) -> u32 {
        let id = bullet.id;
        self.bullets.push(bullet);
        id
    }

    pub fn spawn_drop(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.drops.push(DroppedWeapon { id, pos });
        id
    }

    /// Remove an entity from every group it belongs to
    ///
    /// Idempotent: despawning an absent id is a no-op. The player cannot
    /// be despawned; its death is a state flag, not a removal.
    pub fn despawn(&mut self, id: u32) {
        self.enemies.retain(|e| e.id != id);
        self.bullets.retain(|b| b.id != id);
        self.drops.retain(|d| d.id != id);
    }

    /// Entity count for a group
    pub fn count(&self, group: Group) -> usize {
        match group {
            Group::All => 1 + self.enemies.len() + self.bullets.len() + self.drops.len(),
            Group::Enemies => self.enemies.iter().filter(|e| !e.is_dead).count(),
            Group::Bullets => self.bullets.len(),
            Group::Drops => self.drops.len(),
        }
    }

    /// Stable id snapshot for iteration; spawns and despawns caused by
    /// side effects of the current tick do not disturb it
    pub fn ids(&self, group: Group) -> Vec<u32> {
        match group {
            Group::All => {
                let mut ids = vec![PLAYER_ID];
                ids.extend(self.enemies.iter().map(|e| e.id));
                ids.extend(self.bullets.iter().map(|b| b.id));
                ids.extend(self.drops.iter().map(|d| d.id));
                ids
            }
            Group::Enemies => self
                .enemies
                .iter()
                .filter(|e| !e.is_dead)
                .map(|e| e.id)
                .collect(),
            Group::Bullets => self.bullets.iter().map(|b| b.id).collect(),
            Group::Drops => self.drops.iter().map(|d| d.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileGrid;

    fn registry() -> EntityRegistry {
        let grid = TileGrid::parse("#####\n#P..#\n#.EE#\n#####").unwrap();
        EntityRegistry::seeded(&grid, &Tuning::default())
    }

    #[test]
    fn test_seeded_from_markers() {
        let reg = registry();
        assert_eq!(reg.enemies.len(), 2);
        assert_eq!(reg.count(Group::Enemies), 2);
        assert_eq!(reg.count(Group::All), 3);
    }

    #[test]
    fn test_despawn_is_idempotent() {
        let mut reg = registry();
        let id = reg.spawn_drop(Vec2::ZERO);
        assert_eq!(reg.count(Group::Drops), 1);
        reg.despawn(id);
        assert_eq!(reg.count(Group::Drops), 0);
        // Absent id is a no-op, not an error
        reg.despawn(id);
        reg.despawn(9999);
        assert_eq!(reg.count(Group::Drops), 0);
    }

    #[test]
    fn test_despawn_leaves_every_group() {
        let mut reg = registry();
        let id = reg.enemies[0].id;
        reg.despawn(id);
        assert!(!reg.ids(Group::All).contains(&id));
        assert!(!reg.ids(Group::Enemies).contains(&id));
    }

    #[test]
    fn test_dead_enemy_leaves_enemy_group_but_not_all() {
        let mut reg = registry();
        let id = reg.enemies[0].id;
        reg.enemies[0].kill();
        assert_eq!(reg.count(Group::Enemies), 1);
        assert!(!reg.ids(Group::Enemies).contains(&id));
        assert!(reg.ids(Group::All).contains(&id));
    }

    #[test]
    fn test_ids_are_stable_snapshots() {
        let mut reg = registry();
        let snapshot = reg.ids(Group::Enemies);
        reg.spawn_drop(Vec2::ZERO);
        reg.despawn(snapshot[1]);
        // The snapshot taken earlier is unaffected by later mutation
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_reset_reseeds() {
        let grid = TileGrid::parse("#####\n#P..#\n#.EE#\n#####").unwrap();
        let tuning = Tuning::default();
        let mut reg = EntityRegistry::seeded(&grid, &tuning);
        reg.enemies[0].kill();
        reg.spawn_drop(Vec2::ZERO);
        reg.player.ammo = 0;
        reg.reset(&grid, &tuning);
        assert_eq!(reg.count(Group::Enemies), 2);
        assert_eq!(reg.count(Group::Drops), 0);
        assert_eq!(reg.player.ammo, tuning.ammo_count);
    }
}
