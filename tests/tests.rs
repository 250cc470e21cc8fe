use nbsim::simulation::energy::{kinetic_energy, potential_energy};
use nbsim::simulation::params::KernelParams;
use nbsim::{advance, construct, energy, Integrator, SimdKernel, System, Variant, DT, N_BODIES};
use nbsim::{bench_variants, resolve_variants, run_variant, Error};

/// Energy of the canonical system, 9 decimal places.
const E0: &str = "-0.169075164";

/// Energy after 1000 advances with dt = 0.01.
const E1000: &str = "-0.169087605";

/// Energy after 50,000,000 advances with dt = 0.01.
const E50M: &str = "-0.169059907";

/// Format an energy the way the harness prints it
pub fn fmt9(e: f64) -> String {
    format!("{:.9}", e)
}

/// Advance the canonical system `steps` times with the reference kernel
pub fn reference_after(steps: u64) -> System {
    let mut sys = construct();
    for _ in 0..steps {
        advance(&mut sys, DT);
    }
    sys
}

/// Build `variant` from the canonical system and advance it `steps` times
pub fn variant_after(variant: Variant, steps: u64) -> Box<dyn Integrator> {
    let mut k = variant.build(&construct(), &KernelParams::default());
    k.advance_n(steps, DT);
    k
}

// ==================================================================================
// Construction tests
// ==================================================================================

#[test]
fn construct_is_idempotent() {
    assert_eq!(construct(), construct());
}

#[test]
fn construct_has_zero_total_momentum() {
    let p = construct().total_momentum();
    assert!(p.norm() < 1e-14, "Net momentum not zero: {:?}", p);
}

#[test]
fn sun_is_central_and_most_massive() {
    let sys = construct();
    let sun = sys.bodies[0];
    assert_eq!(sun.m, nbsim::SOLAR_MASS);
    assert_eq!(sun.x, nbsim::NVec3::zeros());
    for b in &sys.bodies[1..] {
        assert!(b.m > 0.0 && b.m < sun.m);
    }
}

#[test]
fn planet_table_is_reproduced_exactly() {
    let jupiter = construct().bodies[1];
    assert_eq!(jupiter.x.x, 4.84143144246472090e+00);
    assert_eq!(jupiter.v.y, 7.69901118419740425e-03 * 365.24);
    assert_eq!(jupiter.m, 9.54791938424326609e-04 * nbsim::SOLAR_MASS);
}

// ==================================================================================
// Energy tests
// ==================================================================================

#[test]
fn initial_energy_matches_reference() {
    assert_eq!(fmt9(energy(&construct())), E0);
}

#[test]
fn energy_is_kinetic_plus_potential() {
    let sys = reference_after(10);
    let split = kinetic_energy(&sys) + potential_energy(&sys);
    assert!((energy(&sys) - split).abs() < 1e-14);
    assert!(kinetic_energy(&sys) > 0.0);
    assert!(potential_energy(&sys) < 0.0);
}

#[test]
fn energy_does_not_mutate() {
    let sys = construct();
    let copy = sys;
    let _ = energy(&sys);
    assert_eq!(sys, copy);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn energy_after_1000_steps_matches_reference() {
    assert_eq!(fmt9(energy(&reference_after(1000))), E1000);
}

#[test]
fn single_step_preserves_momentum() {
    let before = construct();
    let mut after = before;
    advance(&mut after, DT);

    let delta = after.total_momentum() - before.total_momentum();
    assert!(delta.norm() < 1e-14, "Momentum changed by {:?}", delta);
}

#[test]
fn step_moves_every_body() {
    let before = construct();
    let mut after = before;
    advance(&mut after, DT);

    for i in 0..N_BODIES {
        assert_ne!(before.bodies[i].x, after.bodies[i].x, "body {i} did not drift");
        assert_ne!(before.bodies[i].v, after.bodies[i].v, "body {i} was not kicked");
        assert_eq!(before.bodies[i].m, after.bodies[i].m);
    }
}

#[test]
fn drift_uses_kicked_velocity() {
    let before = construct();
    let mut after = before;
    advance(&mut after, DT);

    // x_{n+1} = x_n + v_{n+1} dt for every body
    for (b0, b1) in before.bodies.iter().zip(after.bodies.iter()) {
        assert_eq!(b1.x, b0.x + b1.v * DT);
    }
}

#[test]
fn energy_drift_stays_small_over_short_run() {
    let e0 = energy(&construct());
    let mut sys = construct();
    for _ in 0..10_000 {
        advance(&mut sys, DT);
        assert!((energy(&sys) - e0).abs() < 1e-4);
    }
}

#[test]
#[ignore = "50M steps; run with --release -- --ignored"]
fn energy_after_50m_steps_matches_reference() {
    let e0 = energy(&construct());
    let sys = reference_after(50_000_000);
    let e = energy(&sys);
    assert_eq!(fmt9(e), E50M);
    assert!((e - e0).abs() < 1e-4);
}

// ==================================================================================
// Variant tests
// ==================================================================================

#[test]
fn every_variant_snapshot_round_trips() {
    let sys = construct();
    for v in Variant::ALL {
        let k = v.build(&sys, &KernelParams::default());
        assert_eq!(k.snapshot(), sys, "{v} changed the initial state");
    }
}

#[test]
fn every_variant_reports_initial_energy() {
    for v in Variant::ALL {
        assert_eq!(fmt9(variant_after(v, 0).energy()), E0, "{v}");
    }
}

#[test]
fn every_variant_matches_reference_after_1000_steps() {
    let e_ref = energy(&reference_after(1000));
    for v in Variant::ALL {
        let e = variant_after(v, 1000).energy();
        assert_eq!(fmt9(e), E1000, "{v}");
        assert!((e - e_ref).abs() < 1e-9, "{v}: {e} vs {e_ref}");
    }
}

#[test]
fn variant_energy_agrees_with_snapshot_energy() {
    for v in Variant::ALL {
        let k = variant_after(v, 100);
        assert!((k.energy() - energy(&k.snapshot())).abs() < 1e-15, "{v}");
    }
}

#[test]
fn scalar_variants_track_reference_state() {
    let sys_ref = reference_after(1000);
    for v in [Variant::Flat, Variant::Soa, Variant::Unrolled, Variant::Jump] {
        let snap = variant_after(v, 1000).snapshot();
        for (a, b) in snap.bodies.iter().zip(sys_ref.bodies.iter()) {
            assert!((a.x - b.x).norm() < 1e-12, "{v}");
            assert!((a.v - b.v).norm() < 1e-12, "{v}");
        }
    }
}

#[test]
fn advance_n_equals_repeated_advance() {
    for v in Variant::ALL {
        let mut one = v.build(&construct(), &KernelParams::default());
        for _ in 0..25 {
            one.advance(DT);
        }
        let many = variant_after(v, 25);
        assert_eq!(one.snapshot(), many.snapshot(), "{v}");
    }
}

#[test]
fn jump_run_reports_energy_before_and_after() {
    let mut k = nbsim::JumpKernel::from_system(&construct());
    let (before, after) = k.run(1000, DT);
    assert_eq!(fmt9(before), E0);
    assert_eq!(fmt9(after), E1000);
}

#[test]
fn simd_refinement_controls_accuracy() {
    assert_eq!(SimdKernel::from_system(&construct()).refinements(), 2);

    let e_ref = energy(&reference_after(1000));
    let run = |refinements| {
        let mut k = SimdKernel::with_refinements(&construct(), refinements);
        k.advance_n(1000, DT);
        k.energy()
    };
    assert!((run(0) - e_ref).abs() < 1e-3);
    assert!((run(1) - e_ref).abs() < 1e-6);
    assert!((run(2) - e_ref).abs() < 1e-9);
    assert!((run(3) - e_ref).abs() < 1e-9);
}

// ==================================================================================
// Harness tests
// ==================================================================================

#[test]
fn run_variant_reports_both_energies() {
    let r = run_variant(Variant::Unrolled, &KernelParams::default(), 1000);
    assert_eq!(r.iterations, 1000);
    assert_eq!(fmt9(r.initial_energy), E0);
    assert_eq!(fmt9(r.final_energy), E1000);
    assert!(r.drift().abs() < 1e-4);
}

#[test]
fn unknown_variants_are_skipped() {
    let (found, rejected) = resolve_variants(&["simd", "nope", "Reference"]);
    assert_eq!(found, vec![Variant::Simd, Variant::Reference]);
    assert_eq!(rejected.len(), 1);
    assert!(matches!(rejected[0], Error::UnknownVariant(ref s) if s == "nope"));
}

#[test]
fn bench_ratios_are_relative_to_reference() {
    let s = bench_variants(&[Variant::Flat, Variant::Reference], &KernelParams::default(), 10, 2);
    assert_eq!(s.len(), 2);
    assert_eq!(s[1].variant, Variant::Reference);
    assert!((s[1].ratio - 1.0).abs() < 1e-12 || s[1].mean_ms == 0.0);
    for row in &s {
        assert_eq!(row.runs, 2);
        assert!(row.min_ms <= row.mean_ms && row.mean_ms <= row.max_ms);
    }
}
