//! Rendering seam
//!
//! The simulation draws through [`Canvas`] and never touches a graphics API.
//! A shell resolves [`SpriteId`]s to whatever handle its backend uses via
//! [`SpriteRegistry`]; [`AsciiCanvas`] is the headless backend.

use std::collections::{HashMap, HashSet};
use std::fmt;

use glam::IVec2;

use crate::sim::enemy::EnemyKind;
use crate::sim::fruit::FruitKind;
use crate::sim::geom::{Rect, pixel_to_cell};

/// Linear RGB, 0.0 - 1.0
pub type Rgb = [f32; 3];

/// Everything the game knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Wall,
    Ice,
    Player,
    Enemy(EnemyKind),
    Fruit(FruitKind),
}

impl SpriteId {
    /// Every sprite, in a stable order
    pub fn all() -> Vec<SpriteId> {
        let mut all = vec![SpriteId::Wall, SpriteId::Ice, SpriteId::Player];
        all.extend(EnemyKind::ALL.iter().map(|&k| SpriteId::Enemy(k)));
        all.extend(FruitKind::ALL.iter().map(|&k| SpriteId::Fruit(k)));
        all
    }

    /// Asset path relative to the resource root
    pub fn asset_name(&self) -> &'static str {
        match self {
            SpriteId::Wall => "res/wallBlock.png",
            SpriteId::Ice => "res/iceBlock.png",
            SpriteId::Player => "res/pink_iceCream.png",
            SpriteId::Enemy(EnemyKind::Guard) => "res/guard.png",
            SpriteId::Enemy(EnemyKind::Yeti) => "res/yeti.png",
            SpriteId::Enemy(EnemyKind::Ghost) => "res/ghost.png",
            SpriteId::Enemy(EnemyKind::ThermalTitan) => "res/thermalTitan.png",
            SpriteId::Fruit(FruitKind::Banana) => "res/fruits/banana.png",
            SpriteId::Fruit(FruitKind::Grapes) => "res/fruits/grapes.png",
            SpriteId::Fruit(FruitKind::Lemon) => "res/fruits/lemon.png",
            SpriteId::Fruit(FruitKind::Orange) => "res/fruits/orange.png",
            SpriteId::Fruit(FruitKind::Watermelon) => "res/fruits/watermelon.png",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            SpriteId::Wall => '#',
            SpriteId::Ice => '*',
            SpriteId::Player => '@',
            SpriteId::Enemy(EnemyKind::Guard) => 'G',
            SpriteId::Enemy(EnemyKind::Yeti) => 'Y',
            SpriteId::Enemy(EnemyKind::Ghost) => 'H',
            SpriteId::Enemy(EnemyKind::ThermalTitan) => 'T',
            SpriteId::Fruit(FruitKind::Banana) => 'b',
            SpriteId::Fruit(FruitKind::Grapes) => 'g',
            SpriteId::Fruit(FruitKind::Lemon) => 'l',
            SpriteId::Fruit(FruitKind::Orange) => 'o',
            SpriteId::Fruit(FruitKind::Watermelon) => 'w',
        }
    }

    /// Flat color drawn when the sprite image is unavailable
    pub fn placeholder_color(&self) -> Rgb {
        match self {
            SpriteId::Wall => [0.35, 0.35, 0.4],
            SpriteId::Ice => [0.7, 0.9, 1.0],
            SpriteId::Player => [1.0, 0.6, 0.8],
            SpriteId::Enemy(_) => [0.9, 0.2, 0.2],
            SpriteId::Fruit(_) => [1.0, 0.85, 0.2],
        }
    }
}

/// Drawing surface for one frame
pub trait Canvas {
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
}

/// Backend handles keyed by sprite
#[derive(Debug, Clone)]
pub struct SpriteRegistry<H> {
    sprites: HashMap<SpriteId, H>,
    warned: HashSet<SpriteId>,
}

impl<H> Default for SpriteRegistry<H> {
    fn default() -> Self {
        Self {
            sprites: HashMap::new(),
            warned: HashSet::new(),
        }
    }
}

impl<H> SpriteRegistry<H> {
    /// Load every sprite through `loader`. Failures are logged and left
    /// missing; the game still runs with placeholders.
    pub fn load_with<E: fmt::Display>(mut loader: impl FnMut(&'static str) -> Result<H, E>) -> Self {
        let mut registry = Self::default();
        for sprite in SpriteId::all() {
            match loader(sprite.asset_name()) {
                Ok(handle) => registry.insert(sprite, handle),
                Err(e) => log::warn!("Failed to load {}: {}", sprite.asset_name(), e),
            }
        }
        log::info!("Loaded {} of {} sprites", registry.len(), SpriteId::all().len());
        registry
    }

    pub fn insert(&mut self, sprite: SpriteId, handle: H) {
        self.sprites.insert(sprite, handle);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Look up a handle, warning the first time a sprite turns out missing
    pub fn get(&mut self, sprite: SpriteId) -> Option<&H> {
        let handle = self.sprites.get(&sprite);
        if handle.is_none() && self.warned.insert(sprite) {
            log::warn!("Sprite {} missing, drawing placeholder", sprite.asset_name());
        }
        handle
    }
}

/// One recorded draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<H> {
    Sprite { handle: H, rect: Rect },
    Fill { rect: Rect, color: Rgb },
}

/// Canvas that records a draw list against a registry, substituting a
/// placeholder fill for any missing sprite
pub struct CommandCanvas<'a, H> {
    registry: &'a mut SpriteRegistry<H>,
    pub commands: Vec<DrawCommand<H>>,
}

impl<'a, H: Clone> CommandCanvas<'a, H> {
    pub fn new(registry: &'a mut SpriteRegistry<H>) -> Self {
        Self {
            registry,
            commands: Vec::new(),
        }
    }
}

impl<H: Clone> Canvas for CommandCanvas<'_, H> {
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        match self.registry.get(sprite) {
            Some(handle) => self.commands.push(DrawCommand::Sprite {
                handle: handle.clone(),
                rect,
            }),
            None => self.fill_rect(rect, sprite.placeholder_color()),
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }
}

/// One character per grid cell. A sprite lands on the cell under its centre;
/// later draws overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cols: i32,
    rows: i32,
    cell_size: IVec2,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub const EMPTY: char = '.';
    pub const PLACEHOLDER: char = '?';

    pub fn new(cols: i32, rows: i32, cell_size: IVec2) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            cells: vec![Self::EMPTY; (cols.max(0) * rows.max(0)) as usize],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Self::EMPTY);
    }

    pub fn glyph_at(&self, cell: IVec2) -> Option<char> {
        self.index(cell).map(|i| self.cells[i])
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.cols || cell.y >= self.rows {
            return None;
        }
        Some((cell.y * self.cols + cell.x) as usize)
    }

    fn plot(&mut self, rect: Rect, glyph: char) {
        let centre = rect.pos + rect.size / 2;
        if let Some(i) = self.index(pixel_to_cell(centre, self.cell_size)) {
            self.cells[i] = glyph;
        }
    }
}

impl Canvas for AsciiCanvas {
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        self.plot(rect, sprite.glyph());
    }

    fn fill_rect(&mut self, rect: Rect, _color: Rgb) {
        self.plot(rect, Self::PLACEHOLDER);
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1) as usize) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
