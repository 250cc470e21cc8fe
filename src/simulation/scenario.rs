//! Build the canonical five-body system
//!
//! The sun sits at the origin; the four jovian planets come from a fixed
//! reference table (positions in AU, velocities in AU/day scaled to AU/year,
//! masses in solar masses scaled by `SOLAR_MASS`). The sun's velocity is then
//! chosen so the total momentum of the system is zero.

use crate::simulation::params::{DAYS_PER_YEAR, SOLAR_MASS};
use crate::simulation::states::{Body, System, N_BODIES};

/// Jupiter, Saturn, Uranus, Neptune: position, velocity (per day), mass (solar masses)
const PLANETS: [([f64; 3], [f64; 3], f64); N_BODIES - 1] = [
    // jupiter
    (
        [4.84143144246472090e+00, -1.16032004402742839e+00, -1.03622044471123109e-01],
        [1.66007664274403694e-03, 7.69901118419740425e-03, -6.90460016972063023e-05],
        9.54791938424326609e-04,
    ),
    // saturn
    (
        [8.34336671824457987e+00, 4.12479856412430479e+00, -4.03523417114321381e-01],
        [-2.76742510726862411e-03, 4.99852801234917238e-03, 2.30417297573763929e-05],
        2.85885980666130812e-04,
    ),
    // uranus
    (
        [1.28943695621391310e+01, -1.51111514016986312e+01, -2.23307578892655734e-01],
        [2.96460137564761618e-03, 2.37847173959480950e-03, -2.96589568540237556e-05],
        4.36624404335156298e-05,
    ),
    // neptune
    (
        [1.53796971148509165e+01, -2.59193146099879641e+01, 1.79258772950371181e-01],
        [2.68067772490389322e-03, 1.62824170038242295e-03, -9.51592254519715870e-05],
        5.15138902046611451e-05,
    ),
];

/// Construct the canonical system. Pure and deterministic: two calls return
/// field-for-field identical values.
pub fn construct() -> System {
    let mut bodies = [Body::new([0.0; 3], [0.0; 3], SOLAR_MASS); N_BODIES];

    for (body, (x, v, m)) in bodies[1..].iter_mut().zip(PLANETS.iter()) {
        *body = Body::new(
            *x,
            [v[0] * DAYS_PER_YEAR, v[1] * DAYS_PER_YEAR, v[2] * DAYS_PER_YEAR],
            m * SOLAR_MASS,
        );
    }

    offset_momentum(&mut bodies);
    System { bodies }
}

/// Set the sun's velocity so that `sum m_k * v_k == 0`.
fn offset_momentum(bodies: &mut [Body; N_BODIES]) {
    let (sun, planets) = bodies.split_at_mut(1);

    // accumulate per axis in planet order, then divide once by -SOLAR_MASS
    let (mut px, mut py, mut pz) = (0.0, 0.0, 0.0);
    for p in planets.iter() {
        px += p.v.x * p.m;
        py += p.v.y * p.m;
        pz += p.v.z * p.m;
    }

    let sun = &mut sun[0];
    sun.v.x = px / -SOLAR_MASS;
    sun.v.y = py / -SOLAR_MASS;
    sun.v.z = pz / -SOLAR_MASS;
    sun.m = SOLAR_MASS;
}
