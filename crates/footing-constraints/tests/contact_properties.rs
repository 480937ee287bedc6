//! Property tests for the stage contact constraints.
//!
//! Checks, over randomly drawn forces and friction coefficients, that:
//! 1. The bounded pyramid rows describe exactly `|fx| ≤ μ fz, |fy| ≤ μ fz, fz ≥ 0`
//! 2. Flipping a tangential force mirrors its pair of pyramid faces
//! 3. Absent blocks behave as zero-filled blocks
//! 4. A leg's force only reaches that leg's five rows
//! 5. Declared shapes match what evaluation reads and writes

use footing_constraints::{
    ConstraintBounds, ConstraintFunction, ContactConstraintEvaluator, ContactConstraintJacobian,
    StageArgs, evaluate_leg,
};
use footing_core::{
    CONSTRAINT_DIM, ConstraintConfig, ContactForce, INPUT_DIM, Leg, LegForces, PARAM_DIM, Slot,
};
use footing_test_utils::{feasible_force, params_with_friction, random_input, seeded_rng};
use proptest::prelude::*;

fn arb_force() -> impl Strategy<Value = ContactForce> {
    (-50.0..50.0_f64, -50.0..50.0_f64, -10.0..60.0_f64)
        .prop_map(|(x, y, z)| ContactForce::new(x, y, z))
}

fn arb_mu() -> impl Strategy<Value = f64> {
    0.0..1.5_f64
}

fn arb_leg() -> impl Strategy<Value = Leg> {
    (0..4_usize).prop_map(|i| Leg::from_index(i).unwrap())
}

proptest! {
    #[test]
    fn bounded_rows_equal_friction_pyramid(f in arb_force(), mu in arb_mu(), leg in arb_leg()) {
        let config = ConstraintConfig { friction_coeff: mu, ..ConstraintConfig::default() };
        let mut forces = LegForces::default();
        forces.set(leg, f);
        let u = forces.to_input();
        let p = config.params_vector();
        let h = ContactConstraintEvaluator::new().values(&StageArgs::new(&u, &p));

        let limit = mu * f.z;
        let in_pyramid = f.x.abs() <= limit && f.y.abs() <= limit && f.z >= 0.0;
        let feasible = ConstraintBounds::all_stance(&config).is_satisfied(&h, 0.0);
        prop_assert_eq!(feasible, in_pyramid, "h = {:?}", &h[leg.row_range()]);
    }

    #[test]
    fn rows_match_closed_form(f in arb_force(), mu in arb_mu()) {
        let h = evaluate_leg(&f, mu);
        let m = mu * f.z;
        prop_assert_eq!(h, [f.x - m, f.y - m, f.y + m, f.x + m, f.z]);
    }

    #[test]
    fn flipping_fx_mirrors_x_faces(f in arb_force(), mu in arb_mu()) {
        let h = evaluate_leg(&f, mu);
        let g = evaluate_leg(&ContactForce::new(-f.x, f.y, f.z), mu);
        prop_assert_eq!(g[0], -h[3]);
        prop_assert_eq!(g[3], -h[0]);
        prop_assert_eq!(&g[1..3], &h[1..3]);
        prop_assert_eq!(g[4], h[4]);
    }

    #[test]
    fn flipping_fy_mirrors_y_faces(f in arb_force(), mu in arb_mu()) {
        let h = evaluate_leg(&f, mu);
        let g = evaluate_leg(&ContactForce::new(f.x, -f.y, f.z), mu);
        prop_assert_eq!(g[1], -h[2]);
        prop_assert_eq!(g[2], -h[1]);
        prop_assert_eq!(g[0], h[0]);
        prop_assert_eq!(g[3], h[3]);
    }

    #[test]
    fn sign_flips_preserve_feasibility(f in arb_force(), mu in arb_mu()) {
        let config = ConstraintConfig { friction_coeff: mu, ..ConstraintConfig::default() };
        let bounds = ConstraintBounds::all_stance(&config);
        let p = config.params_vector();
        let eval = ContactConstraintEvaluator::new();
        let feasible = |force: ContactForce| {
            let u = LegForces::uniform(force).to_input();
            bounds.is_satisfied(&eval.values(&StageArgs::new(&u, &p)), 0.0)
        };
        let base = feasible(f);
        prop_assert_eq!(feasible(ContactForce::new(-f.x, f.y, f.z)), base);
        prop_assert_eq!(feasible(ContactForce::new(f.x, -f.y, f.z)), base);
        prop_assert_eq!(feasible(ContactForce::new(-f.x, -f.y, f.z)), base);
    }

    #[test]
    fn zero_forces_give_zero_rows(mu in arb_mu()) {
        let u = [0.0; INPUT_DIM];
        let p = params_with_friction(mu);
        let h = ContactConstraintEvaluator::new().values(&StageArgs::new(&u, &p));
        prop_assert!(h.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn saturated_friction_rows(mu in arb_mu(), leg in arb_leg()) {
        let fz = 10.0;
        let mut forces = LegForces::default();
        forces.set(leg, ContactForce::new(mu * fz, mu * fz, fz));
        let u = forces.to_input();
        let p = params_with_friction(mu);
        let h = ContactConstraintEvaluator::new().values(&StageArgs::new(&u, &p));
        let rows = &h[leg.row_range()];
        prop_assert_eq!(rows, &[0.0, 0.0, 2.0 * mu * fz, 2.0 * mu * fz, 10.0][..]);
    }

    #[test]
    fn leg_forces_stay_in_their_rows(seed in any::<u64>(), leg in arb_leg(), f in arb_force()) {
        let mut rng = seeded_rng(seed);
        let u = random_input(&mut rng, 40.0);
        let p = params_with_friction(0.7);
        let eval = ContactConstraintEvaluator::new();
        let before = eval.values(&StageArgs::new(&u, &p));

        let mut changed = u;
        changed[leg.force_range()].copy_from_slice(f.as_slice());
        let after = eval.values(&StageArgs::new(&changed, &p));

        for i in (0..CONSTRAINT_DIM).filter(|i| !leg.row_range().contains(i)) {
            prop_assert_eq!(before[i], after[i], "row {} changed", i);
        }
    }
}

#[test]
fn absent_input_equals_zero_input() {
    let p = params_with_friction(0.8);
    let zeros = [0.0; INPUT_DIM];
    let eval = ContactConstraintEvaluator::new();

    let explicit = eval.values(&StageArgs::new(&zeros, &p));
    let absent = eval.values(&StageArgs {
        params: (&p[..]).into(),
        ..StageArgs::absent()
    });
    assert_eq!(explicit, absent);
    assert_eq!(absent, [0.0; CONSTRAINT_DIM]);
}

#[test]
fn absent_params_equal_zero_params() {
    let mut rng = seeded_rng(11);
    let u = random_input(&mut rng, 30.0);
    let zeros = [0.0; PARAM_DIM];
    let eval = ContactConstraintEvaluator::new();
    let explicit = eval.values(&StageArgs::new(&u, &zeros));
    let absent = eval.values(&StageArgs {
        input: (&u[..]).into(),
        ..StageArgs::absent()
    });
    assert_eq!(explicit, absent);
}

#[test]
fn sampled_feasible_forces_satisfy_bounds() {
    let mut rng = seeded_rng(5);
    let config = ConstraintConfig {
        friction_coeff: 0.6,
        ..ConstraintConfig::default()
    };
    let bounds = ConstraintBounds::all_stance(&config);
    let p = config.params_vector();
    let eval = ContactConstraintEvaluator::new();

    for _ in 0..200 {
        let mut forces = LegForces::default();
        for leg in Leg::ALL {
            forces.set(leg, feasible_force(&mut rng, config.friction_coeff, 0.0, 80.0));
        }
        let u = forces.to_input();
        let h = eval.values(&StageArgs::new(&u, &p));
        assert!(bounds.is_satisfied(&h, 0.0), "{forces:?}");
    }
}

#[test]
fn declared_shapes_match_evaluation() {
    let f = ContactConstraintEvaluator::new();
    assert_eq!(f.n_in(), 4);
    assert_eq!(f.n_out(), 1);
    for slot in Slot::ALL {
        let sp = f.sparsity_in(slot.index()).unwrap();
        assert_eq!(sp.nnz(), slot.dim(), "slot {slot}");
    }
    assert_eq!(f.sparsity_out(0).unwrap().nnz(), CONSTRAINT_DIM);

    // Exactly-sized blocks are enough, and exactly CONSTRAINT_DIM outputs are written.
    let x = [1.0; 30];
    let u = [1.0; 24];
    let z: [f64; 0] = [];
    let p = [0.5; 29];
    let args = StageArgs::new(&u, &p).with_state(&x).with_algebraic(&z);
    assert!(args.check_shapes().is_ok());

    let mut out = [f64::NAN; CONSTRAINT_DIM + 5];
    f.eval(&args, Some(&mut out[..]));
    assert!(out[..CONSTRAINT_DIM].iter().all(|v| v.is_finite()));
    assert!(out[CONSTRAINT_DIM..].iter().all(|v| v.is_nan()));
}

#[test]
fn jacobian_matches_finite_differences_on_random_stages() {
    let eval = ContactConstraintEvaluator::new();
    let jac = ContactConstraintJacobian::wrt_input();
    let mut rng = seeded_rng(2024);
    let eps = 1e-6;

    for _ in 0..20 {
        let u = random_input(&mut rng, 50.0);
        let p = params_with_friction(rand::Rng::gen_range(&mut rng, 0.0..1.2));
        let dense = jac.dense(&StageArgs::new(&u, &p));

        for j in 0..INPUT_DIM {
            let mut up = u;
            let mut um = u;
            up[j] += eps;
            um[j] -= eps;
            let hp = eval.values(&StageArgs::new(&up, &p));
            let hm = eval.values(&StageArgs::new(&um, &p));
            for i in 0..CONSTRAINT_DIM {
                let fd = (hp[i] - hm[i]) / (2.0 * eps);
                assert!(
                    (dense[(i, j)] - fd).abs() < 1e-5,
                    "d h[{i}] / d u[{j}]: analytic {} vs fd {fd}",
                    dense[(i, j)]
                );
            }
        }
    }
}
