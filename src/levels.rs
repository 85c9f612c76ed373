//! Built-in level data
//!
//! Layouts are rows of cell codes: `0` empty, `1` wall, `2` ice.

use glam::IVec2;

use crate::sim::enemy::EnemyKind;
use crate::sim::fruit::{FruitKind, FruitWave};
use crate::sim::level::{EnemySpawn, LevelConfig};

const LEVEL_1_LAYOUT: [&str; 20] = [
    "11111111111111111111",
    "10000000000000000001",
    "10000000000000000001",
    "10022220000002222001",
    "10020000000000002001",
    "10020000000000002001",
    "10000000000000000001",
    "10000001111110000001",
    "10000000000000000001",
    "10000000000000000001",
    "10000000000000000001",
    "10000001111110000001",
    "10000000000000000001",
    "10020000000000002001",
    "10020000000000002001",
    "10022220000002222001",
    "10000000000000000001",
    "10000000000000000001",
    "10000000000000000001",
    "11111111111111111111",
];

const LEVEL_2_LAYOUT: [&str; 20] = [
    "11111111111111111111",
    "10000000000000000001",
    "10000000000000000001",
    "10011100000000111001",
    "10010000022000001001",
    "10000000022000000001",
    "10000000000000000001",
    "10000111000011100001",
    "10000000000000000001",
    "10002220000002220001",
    "10000000000000000001",
    "10000000000000000001",
    "10002220000002220001",
    "10000000000000000001",
    "10000111000011100001",
    "10000000000000000001",
    "10000000000000000001",
    "10011100000000111001",
    "10000000000000000001",
    "11111111111111111111",
];

const LEVEL_3_LAYOUT: [&str; 20] = [
    "11111111111111111111",
    "10000000000000000001",
    "10000000000000000001",
    "10000000000000000001",
    "10000022222222000001",
    "10000000000000000001",
    "10002000000000020001",
    "10002001111110020001",
    "10002001000010020001",
    "10000000000010000001",
    "10000000000010000001",
    "10002001000010020001",
    "10002001111110020001",
    "10002000000000020001",
    "10000000000000000001",
    "10000022222222000001",
    "10000000000000000001",
    "10000000000000000001",
    "10000000000000000001",
    "11111111111111111111",
];

const LEVEL_4_LAYOUT: [&str; 20] = [
    "11111111111111111111",
    "10000000000000000001",
    "10000000000000000001",
    "10001111000011110001",
    "10000000000000000001",
    "10000000000000000001",
    "10221000000000012201",
    "10000000022000000001",
    "10000000022000000001",
    "10000000000000000001",
    "10000000000000000001",
    "10000000022000000001",
    "10000000022000000001",
    "10221000000000012201",
    "10000000000000000001",
    "10000000000000000001",
    "10001111000011110001",
    "10000000000000000001",
    "10000000000000000001",
    "11111111111111111111",
];

const LEVEL_5_LAYOUT: [&str; 20] = [
    "11111111111111111111",
    "10000000000000000001",
    "10000000000000000001",
    "10002222000022220001",
    "10000000000000000001",
    "10020000000000002001",
    "10020000100100002001",
    "10000000100100000001",
    "10222000000000022201",
    "10000000000000000001",
    "10000000000000000001",
    "10222000000000022201",
    "10000000100100000001",
    "10020000100100002001",
    "10020000000000002001",
    "10000000000000000001",
    "10002222000022220001",
    "10000000000000000001",
    "10000000000000000001",
    "11111111111111111111",
];

/// Turn digit rows into cell codes. Non-digits become an unknown code,
/// which grid construction rejects.
pub fn parse_layout(rows: &[&str]) -> Vec<Vec<u8>> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| c.to_digit(10).map_or(u8::MAX, |d| d as u8))
                .collect()
        })
        .collect()
}

fn level(
    layout: &[&str],
    enemies: Vec<EnemySpawn>,
    fruits: Vec<FruitWave>,
    player_start: (i32, i32),
) -> LevelConfig {
    LevelConfig {
        layout: parse_layout(layout),
        enemies,
        fruits,
        player_start: IVec2::new(player_start.0, player_start.1),
    }
}

/// The five levels of a standard run, in play order
pub fn builtin_levels() -> Vec<LevelConfig> {
    use EnemyKind::*;
    use FruitKind::*;

    vec![
        level(
            &LEVEL_1_LAYOUT,
            vec![EnemySpawn::new(Yeti, 16, 10), EnemySpawn::new(Yeti, 6, 6)],
            vec![FruitWave::new(Banana, 20), FruitWave::new(Grapes, 16)],
            (9, 16),
        ),
        level(
            &LEVEL_2_LAYOUT,
            vec![
                EnemySpawn::new(Guard, 2, 5),
                EnemySpawn::new(Yeti, 17, 7),
                EnemySpawn::new(Yeti, 3, 16),
            ],
            vec![FruitWave::new(Grapes, 7), FruitWave::new(Watermelon, 10)],
            (8, 2),
        ),
        level(
            &LEVEL_3_LAYOUT,
            vec![
                EnemySpawn::new(Guard, 3, 3),
                EnemySpawn::new(Guard, 3, 16),
                EnemySpawn::new(Guard, 16, 16),
                EnemySpawn::new(Guard, 16, 3),
            ],
            vec![FruitWave::new(Banana, 26), FruitWave::new(Orange, 24)],
            (5, 5),
        ),
        level(
            &LEVEL_4_LAYOUT,
            vec![
                EnemySpawn::new(Guard, 4, 4),
                EnemySpawn::new(Ghost, 6, 6),
                EnemySpawn::new(Guard, 13, 8),
            ],
            vec![FruitWave::new(Lemon, 22), FruitWave::new(Orange, 22)],
            (2, 2),
        ),
        level(
            &LEVEL_5_LAYOUT,
            vec![
                EnemySpawn::new(ThermalTitan, 4, 4),
                EnemySpawn::new(Ghost, 6, 6),
                EnemySpawn::new(Yeti, 13, 8),
            ],
            vec![
                FruitWave::new(Banana, 16),
                FruitWave::new(Grapes, 16),
                FruitWave::new(Watermelon, 4),
            ],
            (2, 2),
        ),
    ]
}
