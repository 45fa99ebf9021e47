use cloth_core::{
    BodyId, ClothConfig, ClothGeometry, ClothMesh, Gust, Integrator, RenderVertex, Scene,
    SceneConfig, Setup, SphereCollider,
};
use glam::Vec3;
use wasm_bindgen::prelude::*;

/// One cloth plus any number of sphere colliders, driven frame by frame from
/// JavaScript. After every `step` the vertex buffer holds interleaved
/// `RenderVertex` data (position, normal, uv: 32 bytes) ready for upload.
#[wasm_bindgen]
pub struct ClothWorld {
    scene: Scene,
    cloth: BodyId,
    spheres: Vec<BodyId>,
    geometry: ClothGeometry,
    vertex_buffer: Vec<RenderVertex>,
}

#[wasm_bindgen]
impl ClothWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(knots_per_side: u32, knot_spacing: f32) -> Result<ClothWorld, JsError> {
        let config = ClothConfig {
            knots_per_side,
            knot_spacing,
            ..ClothConfig::default()
        };
        let mut mesh = ClothMesh::new(config, Vec3::new(0.0, 4.0, 0.0))?;
        mesh.apply_setup(Setup::Hooks)?;
        let geometry = ClothGeometry::new(&mesh);

        let mut scene = Scene::new(SceneConfig::default())?;
        let cloth = scene.add_cloth(mesh);

        web_sys::console::log_1(
            &format!(
                "WASM ClothWorld created: {0}x{0} knots, {1} triangles",
                knots_per_side,
                geometry.triangle_count()
            )
            .into(),
        );

        let vertex_buffer = geometry.vertices();
        Ok(ClothWorld {
            scene,
            cloth,
            spheres: Vec::new(),
            geometry,
            vertex_buffer,
        })
    }

    /// Advance one rendered frame. Returns the time spent, in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, frame_dt: f32, time: f32) -> f32 {
        let start = js_sys::Date::now();
        self.scene.advance_frame(time, frame_dt);
        self.write_vertex_buffer();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_ptr(&self) -> *const f32 {
        self.vertex_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<RenderVertex, u8>(&self.vertex_buffer).len()
    }

    /// Triangle list, three knot indices per triangle. Fixed for the
    /// lifetime of the world.
    #[wasm_bindgen]
    pub fn get_indices(&self) -> Vec<u32> {
        self.geometry.indices().to_vec()
    }

    #[wasm_bindgen]
    pub fn knot_count(&self) -> usize {
        self.vertex_buffer.len()
    }

    /// Switch to layout preset `number` (1..=5).
    #[wasm_bindgen]
    pub fn set_setup(&mut self, number: u32) -> Result<(), JsError> {
        let setup = Setup::from_number(number)?;
        self.scene.cloth_mut(self.cloth)?.apply_setup(setup)?;
        self.write_vertex_buffer();
        web_sys::console::log_1(&format!("cloth setup {number}: {setup:?}").into());
        Ok(())
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.scene.reset();
        self.write_vertex_buffer();
    }

    /// Constant wind on every knot.
    #[wasm_bindgen]
    pub fn set_wind(&mut self, x: f32, y: f32, z: f32) -> Result<(), JsError> {
        self.scene.cloth_mut(self.cloth)?.set_wind_force(Vec3::new(x, y, z));
        Ok(())
    }

    /// Oscillating wind on top of the constant wind. Zero amplitude turns it off.
    #[wasm_bindgen]
    pub fn set_gust(
        &mut self,
        dir_x: f32,
        dir_y: f32,
        dir_z: f32,
        amplitude: f32,
        frequency: f32,
    ) -> Result<(), JsError> {
        let gust = (amplitude != 0.0).then(|| Gust {
            direction: Vec3::new(dir_x, dir_y, dir_z).normalize_or_zero(),
            amplitude,
            frequency,
        });
        self.scene.cloth_mut(self.cloth)?.set_gust(gust);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.scene.set_acceleration(Vec3::new(x, y, z));
    }

    #[wasm_bindgen]
    pub fn set_substeps(&mut self, substeps: u32) -> Result<(), JsError> {
        self.scene.set_substeps(substeps)?;
        Ok(())
    }

    /// 0 selects RK4, anything else Euler.
    #[wasm_bindgen]
    pub fn set_integrator(&mut self, integrator: u32) {
        let integrator = match integrator {
            0 => Integrator::RungeKutta4,
            _ => Integrator::Euler,
        };
        self.scene.set_integrator(integrator);
    }

    #[wasm_bindgen]
    pub fn set_mass(&mut self, mass: f32, force_damping: f32) -> Result<(), JsError> {
        self.scene.cloth_mut(self.cloth)?.set_mass(mass, force_damping)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_knot_static(&mut self, index: usize, is_static: bool) -> Result<(), JsError> {
        let cloth = self.scene.cloth_mut(self.cloth)?;
        if is_static {
            cloth.set_static(index)?;
        } else {
            cloth.set_non_static(index)?;
        }
        Ok(())
    }

    /// Add a sphere collider. Returns its handle for `move_sphere`.
    #[wasm_bindgen]
    pub fn add_sphere(&mut self, radius: f32, x: f32, y: f32, z: f32) -> Result<usize, JsError> {
        let sphere = SphereCollider::new(radius, Vec3::new(x, y, z))?;
        let id = self.scene.add_sphere(sphere);
        self.spheres.push(id);
        Ok(self.spheres.len() - 1)
    }

    #[wasm_bindgen]
    pub fn move_sphere(&mut self, handle: usize, x: f32, y: f32, z: f32) -> Result<(), JsError> {
        let id = self.sphere_id(handle)?;
        self.scene.sphere_mut(id)?.set_position(Vec3::new(x, y, z));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_sphere_velocity(
        &mut self,
        handle: usize,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(), JsError> {
        let id = self.sphere_id(handle)?;
        self.scene.sphere_mut(id)?.set_velocity(Vec3::new(x, y, z));
        Ok(())
    }
}

impl ClothWorld {
    fn sphere_id(&self, handle: usize) -> Result<BodyId, JsError> {
        self.spheres
            .get(handle)
            .copied()
            .ok_or_else(|| JsError::new(&format!("no sphere with handle {handle}")))
    }

    fn write_vertex_buffer(&mut self) {
        if let Ok(mesh) = self.scene.cloth(self.cloth) {
            self.geometry.update(mesh);
            self.vertex_buffer = self.geometry.vertices();
        }
    }
}
