use glam::Vec3;

use crate::config::{ClothConfig, SpringParams};
use crate::knot::Knot;

/// Separations shorter than this have no usable direction.
const MIN_SEPARATION: f32 = 1e-8;

/// The three neighbor relations of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringClass {
    /// Structural, one grid step along a row or column.
    Adjacent,
    /// Shear, one step along a grid diagonal.
    Diagonal,
    /// Bend, two steps along a row or column.
    Flex,
}

impl SpringClass {
    pub const ALL: [SpringClass; 3] = [
        SpringClass::Adjacent,
        SpringClass::Diagonal,
        SpringClass::Flex,
    ];

    /// Rest length for a grid of pitch `spacing`.
    pub fn rest_length(self, spacing: f32) -> f32 {
        match self {
            SpringClass::Adjacent => spacing,
            SpringClass::Diagonal => spacing * std::f32::consts::SQRT_2,
            SpringClass::Flex => spacing * 2.0,
        }
    }

    pub fn params(self, config: &ClothConfig) -> SpringParams {
        match self {
            SpringClass::Adjacent => config.adjacent,
            SpringClass::Diagonal => config.diagonal,
            SpringClass::Flex => config.flex,
        }
    }
}

/// Spring-damper force acting on `a` from its spring to `b`.
///
/// `f = (-k (|dp| - rest) - b dot(dv, dp_hat)) dp_hat` with `dp = a - b`.
/// The damping term projects the relative velocity onto the normalized
/// separation. Returns `None` when the knots coincide.
pub fn spring_force(a: &Knot, b: &Knot, rest_length: f32, params: SpringParams) -> Option<Vec3> {
    let delta_p = a.position() - b.position();
    let distance = delta_p.length();
    if distance < MIN_SEPARATION {
        return None;
    }
    let delta_p_hat = delta_p / distance;
    let delta_v = a.velocity() - b.velocity();

    let elongation = distance - rest_length;
    let magnitude = -params.stiffness * elongation - params.damping * delta_v.dot(delta_p_hat);
    Some(magnitude * delta_p_hat)
}

/// Accumulate the spring between knots `i` and `j` onto both endpoints.
///
/// `i` receives `f + wind` and `j` receives `-f + wind`, where `wind` is the
/// wind acting on `i`. Static knots never accumulate force.
pub fn apply_pair(
    knots: &mut [Knot],
    i: usize,
    j: usize,
    rest_length: f32,
    params: SpringParams,
    wind: Vec3,
) {
    let Some(f) = spring_force(&knots[i], &knots[j], rest_length, params) else {
        return;
    };
    if !knots[j].is_static() {
        knots[j].add_force(-f + wind);
    }
    if !knots[i].is_static() {
        knots[i].add_force(f + wind);
    }
}

/// Visit every spring of knot `i` in all three classes.
///
/// Each unordered pair is visited once from each endpoint when the caller
/// loops over all knots; both visits apply to both endpoints.
pub fn apply_knot_springs(knots: &mut [Knot], i: usize, config: &ClothConfig, gust: Vec3) {
    let wind = knots[i].wind_force() + gust;
    for class in SpringClass::ALL {
        let rest_length = class.rest_length(config.knot_spacing);
        let params = class.params(config);
        for n in 0..knots[i].neighbors(class).len() {
            let j = knots[i].neighbors(class)[n] as usize;
            apply_pair(knots, i, j, rest_length, params, wind);
        }
    }
}
