use bevy::math::IVec2;
use rand::Rng;

use crate::core::{Level, Terrain};

/// Generates a city block layout: intersections on every even/even cell,
/// solid blocks on odd/odd cells, and street segments in between that are
/// built over with probability `building_chance`. The dozer starts on the
/// intersection closest to the centre.
pub fn generate_city<R: Rng>(width: i32, height: i32, building_chance: f64, rng: &mut R) -> Level {
    let width = width.max(1);
    let height = height.max(1);
    let building_chance = building_chance.clamp(0.0, 1.0);

    let mut level = Level::new_filled(width, height, Terrain::Building);
    for x in 0..width {
        for y in 0..height {
            let terrain = match (x % 2 == 0, y % 2 == 0) {
                (true, true) => Terrain::Street,
                (false, false) => Terrain::Building,
                _ if rng.random_bool(building_chance) => Terrain::Building,
                _ => Terrain::Street,
            };
            level.set(&IVec2::new(x, y), terrain);
        }
    }

    let centre = IVec2::new(even_floor(width / 2), even_floor(height / 2));
    level.clone().with_dozer(centre).unwrap_or(level)
}

fn even_floor(v: i32) -> i32 {
    v - v % 2
}
