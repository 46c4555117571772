//! Tile map parsing and wall occupancy queries
//!
//! A map is a rectangular text grid, one line per row:
//! `#` wall, `P` player spawn, `E` enemy spawn, `X` exit tile,
//! anything else open floor. The grid is immutable after construction.

use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use crate::consts::TILE_SIZE;

/// Map load/parse failures. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map has no rows")]
    Empty,
    #[error("map row {line} has {found} tiles, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Static boolean occupancy grid with spawn markers
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major wall flags, `cells[y * width + x]`
    cells: Vec<bool>,
    player_spawn: Option<Vec2>,
    enemy_spawns: Vec<Vec2>,
    exit_tile: Option<(usize, usize)>,
}

impl TileGrid {
    /// Read and parse a map file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a map from its text form
    ///
    /// The first `P` and first `X` win; every `E` spawns one enemy. Once an
    /// exit is placed the rest of that row parses as open floor (a quirk of
    /// the original map format, kept so existing maps behave identically).
    /// Ragged or empty grids are rejected rather than silently truncated.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();
        if lines.is_empty() || lines.iter().all(|l| l.is_empty()) {
            return Err(MapError::Empty);
        }

        let width = lines[0].chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * lines.len());
        let mut player_spawn = None;
        let mut enemy_spawns = Vec::new();
        let mut exit_tile = None;

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    line: y,
                    expected: width,
                    found,
                });
            }

            let mut rest_is_floor = false;
            for (x, symbol) in line.chars().enumerate() {
                if rest_is_floor {
                    cells.push(false);
                    continue;
                }
                match symbol {
                    '#' => cells.push(true),
                    'P' => {
                        cells.push(false);
                        if player_spawn.is_none() {
                            player_spawn = Some(tile_to_world(x, y));
                        }
                    }
                    'E' => {
                        cells.push(false);
                        enemy_spawns.push(tile_to_world(x, y));
                    }
                    'X' if exit_tile.is_none() => {
                        // The exit is a solid tile; the player only needs to
                        // overlap its corner point, not stand on it.
                        cells.push(true);
                        exit_tile = Some((x, y));
                        rest_is_floor = true;
                    }
                    _ => cells.push(false),
                }
            }
        }

        log::info!(
            "Parsed map: {}x{} tiles, {} enemy spawns, exit: {}",
            width,
            lines.len(),
            enemy_spawns.len(),
            exit_tile.is_some()
        );

        Ok(Self {
            width,
            height: lines.len(),
            cells,
            player_spawn,
            enemy_spawns,
            exit_tile,
        })
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the tile under a world coordinate is a wall
    ///
    /// Coordinates outside the grid (including negative) are open by
    /// design; callers must not assume the world is bounded.
    pub fn is_wall(&self, world_x: f32, world_y: f32) -> bool {
        let tile_x = (world_x / TILE_SIZE).floor() as i64;
        let tile_y = (world_y / TILE_SIZE).floor() as i64;

        if tile_x < 0 || tile_y < 0 || tile_x >= self.width as i64 || tile_y >= self.height as i64 {
            return false;
        }
        self.cells[tile_y as usize * self.width + tile_x as usize]
    }

    /// Player spawn point in world coordinates, if the map marks one
    pub fn player_spawn(&self) -> Option<Vec2> {
        self.player_spawn
    }

    /// Enemy spawn points in world coordinates
    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    /// Exit tile in tile coordinates, if the map marks one
    pub fn exit_tile(&self) -> Option<(usize, usize)> {
        self.exit_tile
    }

    /// Exit tile corner point in world coordinates
    pub fn exit_world_pos(&self) -> Option<Vec2> {
        self.exit_tile.map(|(x, y)| tile_to_world(x, y))
    }
}

fn tile_to_world(x: usize, y: usize) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
}
