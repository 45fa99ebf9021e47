use glam::Vec3;

use crate::collider::SphereCollider;
use crate::config::{self, ClothConfig, Gust, Integrator};
use crate::error::{ClothError, Result};
use crate::forces::spring::apply_knot_springs;
use crate::knot::Knot;

/// An `n x n` grid of knots joined by springs.
///
/// Knot `row * n + col` sits in column `col` and row `row`; row indices grow
/// "up" (+y when the cloth hangs in the xy plane). The knot array is built
/// once and never grows, so neighbor indices stay valid for the lifetime of
/// the mesh.
#[derive(Debug)]
pub struct ClothMesh {
    knots: Vec<Knot>,
    config: ClothConfig,
    origin: Vec3,
}

impl ClothMesh {
    /// Build a cloth hanging in the xy plane, centered on `origin`.
    pub fn new(config: ClothConfig, origin: Vec3) -> Result<Self> {
        config.validate()?;

        let n = config.knots_per_side as usize;
        let half = (n as f32 - 1.0) * 0.5;
        let mut knots = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let position = origin
                    + Vec3::new(
                        (col as f32 - half) * config.knot_spacing,
                        (row as f32 - half) * config.knot_spacing,
                        0.0,
                    );
                let knot = Knot::new((row * n + col) as u32, position)
                    .with_mass(config.mass, config.force_damping)?;
                knots.push(knot);
            }
        }

        let mut mesh = Self { knots, config, origin };
        mesh.create_knot_neighbors();
        log::debug!(
            "built {n}x{n} cloth at {origin} with spacing {}",
            mesh.config.knot_spacing
        );
        Ok(mesh)
    }

    /// Link every knot to its adjacent, diagonal and flex neighbors by index
    /// arithmetic alone. No link wraps across a row or column border.
    fn create_knot_neighbors(&mut self) {
        let n = self.knots_per_side();
        for index in 0..self.knots.len() {
            let col = index % n;
            let row = index / n;
            let has_right = col + 1 < n;
            let has_left = col > 0;
            let has_up = row + 1 < n;
            let has_down = row > 0;

            let knot = &mut self.knots[index];

            if has_right {
                knot.add_adjacent_neighbor((index + 1) as u32);
            }
            if has_left {
                knot.add_adjacent_neighbor((index - 1) as u32);
            }
            if has_up {
                knot.add_adjacent_neighbor((index + n) as u32);
            }
            if has_down {
                knot.add_adjacent_neighbor((index - n) as u32);
            }

            if has_up && has_right {
                knot.add_diagonal_neighbor((index + n + 1) as u32);
            }
            if has_down && has_left {
                knot.add_diagonal_neighbor((index - n - 1) as u32);
            }
            if has_down && has_right {
                knot.add_diagonal_neighbor((index - n + 1) as u32);
            }
            if has_up && has_left {
                knot.add_diagonal_neighbor((index + n - 1) as u32);
            }

            if col + 2 < n {
                knot.add_flex_neighbor((index + 2) as u32);
            }
            if col >= 2 {
                knot.add_flex_neighbor((index - 2) as u32);
            }
            if row + 2 < n {
                knot.add_flex_neighbor((index + 2 * n) as u32);
            }
            if row >= 2 {
                knot.add_flex_neighbor((index - 2 * n) as u32);
            }
        }
    }

    /// Accumulate every spring force, then integrate the accumulated forces.
    ///
    /// The phases never interleave: all knots finish accumulating before any
    /// knot converts force to velocity. `t` drives the optional gust.
    pub fn apply_spring_force(&mut self, t: f32, dt: f32) {
        let gust = self.config.gust.map_or(Vec3::ZERO, |g| g.at(t));

        for i in 0..self.knots.len() {
            if !self.knots[i].is_static() {
                apply_knot_springs(&mut self.knots, i, &self.config, gust);
            }
        }

        for knot in self.knots.iter_mut() {
            knot.integrate_force(dt);
        }
    }

    /// RK4-integrate gravity for every free knot.
    pub fn integrate_velocity(&mut self, acceleration: Vec3, dt: f32) {
        for knot in self.knots.iter_mut() {
            knot.integrate_velocity(acceleration, dt);
        }
    }

    pub fn apply_g(&mut self, gravity: Vec3, dt: f32) {
        for knot in self.knots.iter_mut() {
            knot.apply_g(gravity, dt);
        }
    }

    /// Advance every free knot under `acceleration` with the chosen integrator.
    pub fn integrate(&mut self, integrator: Integrator, acceleration: Vec3, dt: f32) {
        match integrator {
            Integrator::RungeKutta4 => self.integrate_velocity(acceleration, dt),
            Integrator::Euler => {
                for knot in self.knots.iter_mut() {
                    knot.integrate_euler(acceleration, dt);
                }
            }
        }
    }

    /// Push every free knot out of `sphere`. Returns how many knots moved.
    pub fn resolve_collisions(&mut self, sphere: &SphereCollider) -> usize {
        self.knots
            .iter_mut()
            .filter(|knot| !knot.is_static())
            .map(|knot| sphere.resolve_collision(knot))
            .filter(|&moved| moved)
            .count()
    }

    /// Reset every free knot. Pinned knots keep their preset positions.
    pub fn reset(&mut self) {
        for knot in self.knots.iter_mut().filter(|k| !k.is_static()) {
            knot.reset();
        }
    }

    fn knot_mut(&mut self, index: usize) -> Result<&mut Knot> {
        let count = self.knots.len();
        self.knots
            .get_mut(index)
            .ok_or(ClothError::KnotOutOfBounds { index, count })
    }

    pub fn set_static(&mut self, index: usize) -> Result<()> {
        self.knot_mut(index)?.set_static();
        Ok(())
    }

    pub fn set_non_static(&mut self, index: usize) -> Result<()> {
        self.knot_mut(index)?.set_non_static();
        Ok(())
    }

    pub fn set_all_non_static(&mut self) {
        for knot in self.knots.iter_mut() {
            knot.set_non_static();
        }
    }

    /// Set the same wind force on every knot.
    pub fn set_wind_force(&mut self, wind: Vec3) {
        for knot in self.knots.iter_mut() {
            knot.set_wind_force(wind);
        }
    }

    pub fn set_knot_wind_force(&mut self, index: usize, wind: Vec3) -> Result<()> {
        self.knot_mut(index)?.set_wind_force(wind);
        Ok(())
    }

    /// Place knot `index` at `position` and record it as its reset target.
    pub fn place_knot(&mut self, index: usize, position: Vec3) -> Result<()> {
        self.knot_mut(index)?.place(position);
        Ok(())
    }

    /// Set mass and force damping on every knot.
    pub fn set_mass(&mut self, mass: f32, force_damping: f32) -> Result<()> {
        config::validate_mass(mass)?;
        config::validate_force_damping(force_damping)?;
        self.config.mass = mass;
        self.config.force_damping = force_damping;
        for knot in self.knots.iter_mut() {
            knot.set_mass(mass, force_damping);
        }
        Ok(())
    }

    pub fn set_gust(&mut self, gust: Option<Gust>) {
        self.config.gust = gust;
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn knot(&self, index: usize) -> Option<&Knot> {
        self.knots.get(index)
    }

    /// Current positions in row-major order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.knots.iter().map(Knot::position).collect()
    }

    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    pub fn knots_per_side(&self) -> usize {
        self.config.knots_per_side as usize
    }

    pub fn knot_spacing(&self) -> f32 {
        self.config.knot_spacing
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.knots_per_side() + col
    }
}
