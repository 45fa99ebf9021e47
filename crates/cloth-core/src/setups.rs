//! Layout presets: pin pattern, initial placement and mass of a cloth.
//!
//! Applying a preset is idempotent: applying the same preset twice leaves the
//! cloth in the same state as applying it once.

use glam::Vec3;

use crate::error::{ClothError, Result};
use crate::mesh::ClothMesh;

/// How a preset lays the grid out in space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Rows grow along +y, in the xy plane.
    Hanging,
    /// Rows grow along -z, in the xz plane.
    Draped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Setup {
    /// Four corners pinned, lying flat.
    Corners,
    /// Whole border pinned, lying flat like a trampoline.
    Edges,
    /// Entire top row pinned, hanging.
    TopEdge,
    /// Two top corners pinned and pulled outward, hanging.
    TopCorners,
    /// Five evenly spaced hooks along the top row, hanging.
    Hooks,
}

impl Setup {
    pub const ALL: [Setup; 5] = [
        Setup::Corners,
        Setup::Edges,
        Setup::TopEdge,
        Setup::TopCorners,
        Setup::Hooks,
    ];

    /// Presets are numbered 1..=5 for drivers that bind them to keys.
    pub fn from_number(number: u32) -> Result<Self> {
        match number {
            1 => Ok(Setup::Corners),
            2 => Ok(Setup::Edges),
            3 => Ok(Setup::TopEdge),
            4 => Ok(Setup::TopCorners),
            5 => Ok(Setup::Hooks),
            other => Err(ClothError::UnknownSetup(other)),
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Setup::Corners => 1,
            Setup::Edges => 2,
            Setup::TopEdge => 3,
            Setup::TopCorners => 4,
            Setup::Hooks => 5,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Setup::Corners | Setup::Edges => Orientation::Draped,
            Setup::TopEdge | Setup::TopCorners | Setup::Hooks => Orientation::Hanging,
        }
    }

    pub fn mass(self) -> f32 {
        match self {
            Setup::Corners | Setup::TopEdge | Setup::Hooks => 1.0,
            Setup::Edges => 0.5,
            Setup::TopCorners => 1.2,
        }
    }

    pub fn force_damping(self) -> f32 {
        match self {
            Setup::Corners | Setup::TopEdge | Setup::Hooks => 0.95,
            Setup::Edges => 0.9,
            Setup::TopCorners => 0.93,
        }
    }

    /// Knot indices pinned by this preset on an `n x n` grid, ascending.
    pub fn pinned_indices(self, n: usize) -> Vec<usize> {
        let last = n - 1;
        let top = last * n;
        let mut pins: Vec<usize> = match self {
            Setup::Corners => vec![0, last, top, top + last],
            Setup::Edges => (0..n * n)
                .filter(|&i| {
                    let (col, row) = (i % n, i / n);
                    col == 0 || col == last || row == 0 || row == last
                })
                .collect(),
            Setup::TopEdge => (top..top + n).collect(),
            Setup::TopCorners => vec![top, top + last],
            Setup::Hooks => (0..=4)
                .map(|k| top + (k * last + 2) / 4)
                .collect(),
        };
        pins.sort_unstable();
        pins.dedup();
        pins
    }

    /// Extra displacement of a knot at the start of the preset.
    fn stretch(self, col: usize, row: usize, n: usize, spacing: f32) -> Vec3 {
        let last = n - 1;
        match self {
            Setup::TopCorners if row == last && col == 0 => Vec3::new(-0.5 * spacing, 0.0, 0.0),
            Setup::TopCorners if row == last && col == last => Vec3::new(0.5 * spacing, 0.0, 0.0),
            _ => Vec3::ZERO,
        }
    }

    /// Reconfigure `mesh` in place.
    ///
    /// Unpins and resets every knot, pins this preset's indices, lays every
    /// knot out row by row at the cloth's spacing (recording the layout as
    /// the reset target), then sets mass and force damping on all knots.
    pub fn apply(self, mesh: &mut ClothMesh) -> Result<()> {
        mesh.set_all_non_static();
        mesh.reset();

        let n = mesh.knots_per_side();
        for index in self.pinned_indices(n) {
            mesh.set_static(index)?;
        }

        let spacing = mesh.knot_spacing();
        let origin = mesh.origin();
        let half = (n as f32 - 1.0) * 0.5;
        for row in 0..n {
            for col in 0..n {
                let u = (col as f32 - half) * spacing;
                let v = (row as f32 - half) * spacing;
                let local = match self.orientation() {
                    Orientation::Hanging => Vec3::new(u, v, 0.0),
                    Orientation::Draped => Vec3::new(u, 0.0, -v),
                };
                let position = origin + local + self.stretch(col, row, n, spacing);
                mesh.place_knot(row * n + col, position)?;
            }
        }

        mesh.set_mass(self.mass(), self.force_damping())?;
        log::debug!("applied cloth setup {} ({self:?})", self.number());
        Ok(())
    }
}

impl ClothMesh {
    pub fn apply_setup(&mut self, setup: Setup) -> Result<()> {
        setup.apply(self)
    }
}
