use glam::Vec3;

/// Time derivative of a knot's `(x, v)` state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivative {
    pub dx: Vec3,
    pub dv: Vec3,
}

/// Derivative at `(x + d.dx * dt, v + d.dv * dt)` under constant
/// acceleration. Only the velocity part of the state feeds `dx`.
#[inline]
fn evaluate(velocity: Vec3, acceleration: Vec3, dt: f32, d: Derivative) -> Derivative {
    Derivative {
        dx: velocity + d.dv * dt,
        dv: acceleration,
    }
}

/// One classic Runge-Kutta 4 step of `dx/dt = v, dv/dt = a`.
///
/// Returns the new `(position, velocity)`. With constant `a` this is exact:
/// `x += (v + a dt / 2) dt`, `v += a dt`.
pub fn rk4_step(position: Vec3, velocity: Vec3, acceleration: Vec3, dt: f32) -> (Vec3, Vec3) {
    let k1 = evaluate(velocity, acceleration, 0.0, Derivative::default());
    let k2 = evaluate(velocity, acceleration, dt * 0.5, k1);
    let k3 = evaluate(velocity, acceleration, dt * 0.5, k2);
    let k4 = evaluate(velocity, acceleration, dt, k3);

    let dxdt = (k1.dx + 2.0 * (k2.dx + k3.dx) + k4.dx) / 6.0;
    let dvdt = (k1.dv + 2.0 * (k2.dv + k3.dv) + k4.dv) / 6.0;

    (position + dxdt * dt, velocity + dvdt * dt)
}

/// Semi-implicit Euler: velocity first, then position with the new velocity.
pub fn euler_step(position: Vec3, velocity: Vec3, acceleration: Vec3, dt: f32) -> (Vec3, Vec3) {
    let velocity = velocity + acceleration * dt;
    (position + velocity * dt, velocity)
}
