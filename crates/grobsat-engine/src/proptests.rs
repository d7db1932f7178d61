//! Property-based tests for saturation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use grobsat_core::ResLimit;
    use grobsat_poly::{Monomial, Poly, PolyManager, Rational, Var};

    use crate::config::{Algorithm, Config};
    use crate::equation::EqState;
    use crate::solver::{Grobner, Outcome};

    const NUM_VARS: u32 = 3;
    const SECOND_GROUP: u32 = 100;

    // A system of polynomials with a known common rational root.
    #[derive(Clone, Debug)]
    struct System {
        root: Vec<i64>,
        polys: Vec<Poly>,
    }

    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec((0..NUM_VARS, 0u32..3), 0..3).prop_map(|powers| {
            let powers: Vec<(Var, u32)> = powers.into_iter().map(|(v, e)| (Var(v), e)).collect();
            Monomial::from_powers(&powers)
        })
    }

    fn small_poly() -> impl Strategy<Value = Poly> {
        proptest::collection::vec((small_monomial(), -3i64..4), 1..4).prop_map(|terms| {
            Poly::from_terms(
                terms
                    .into_iter()
                    .map(|(m, c)| (m, Rational::from_int(c)))
                    .collect(),
            )
        })
    }

    // Shifts each polynomial by its value at the root so the root is a
    // common zero.
    fn system() -> impl Strategy<Value = System> {
        (
            proptest::collection::vec(-2i64..3, NUM_VARS as usize),
            proptest::collection::vec(small_poly(), 1..4),
        )
            .prop_map(|(root, polys)| {
                let point = point(&root);
                let polys = polys
                    .into_iter()
                    .map(|p| {
                        let value = p.eval(&point);
                        p.sub(&Poly::constant(value))
                    })
                    .collect();
                System { root, polys }
            })
    }

    fn point(root: &[i64]) -> Vec<Rational> {
        root.iter().copied().map(Rational::from_int).collect()
    }

    fn algorithm() -> impl Strategy<Value = Algorithm> {
        prop_oneof![Just(Algorithm::Basic), Just(Algorithm::Tuned)]
    }

    fn manager() -> PolyManager {
        let mut m = PolyManager::new();
        for _ in 0..NUM_VARS {
            m.mk_var();
        }
        m
    }

    fn bounded(algorithm: Algorithm) -> Config {
        Config {
            eqs_threshold: 40,
            expr_size_limit: 60,
            algorithm,
        }
    }

    // Builds the engine input with one fact per polynomial.
    fn load(g: &mut Grobner<'_>, polys: &[Poly]) {
        for (k, p) in polys.iter().enumerate() {
            let p = g.manager_mut().mk(p.clone()).unwrap();
            let d = g.dep_mut().leaf(k as u32);
            g.add_with(p, d);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn derived_equations_vanish_at_the_root(sys in system(), alg in algorithm()) {
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(alg));
            load(&mut g, &sys.polys);
            let outcome = g.saturate();

            prop_assert_ne!(outcome, Outcome::Conflict);
            let root = point(&sys.root);
            for e in g.equations() {
                prop_assert_eq!(g.manager().eval(e.poly(), &root), Rational::from_int(0));
            }
        }

        #[test]
        fn justifications_only_name_inputs(sys in system(), alg in algorithm()) {
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(alg));
            load(&mut g, &sys.polys);
            g.saturate();

            let n = sys.polys.len() as u32;
            for e in g.equations() {
                prop_assert!(g.dep().linearize(e.dep()).iter().all(|&f| f < n));
            }
        }

        #[test]
        fn justifications_cover_every_parent(
            first in system(),
            second in system(),
            alg in algorithm(),
        ) {
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(alg));
            load(&mut g, &first.polys);
            for (k, p) in second.polys.iter().enumerate() {
                let p = g.manager_mut().mk(p.clone()).unwrap();
                let d = g.dep_mut().leaf(SECOND_GROUP + k as u32);
                g.add_with(p, d);
            }
            g.saturate();

            // an equation blamed on one group alone lies in that group's
            // ideal, so it vanishes at that group's root
            let roots = [point(&first.root), point(&second.root)];
            for e in g.equations() {
                let facts = g.dep().linearize(e.dep());
                let group = if facts.iter().all(|&f| f < SECOND_GROUP) {
                    0
                } else if facts.iter().all(|&f| f >= SECOND_GROUP) {
                    1
                } else {
                    continue;
                };
                prop_assert_eq!(
                    g.manager().eval(e.poly(), &roots[group]),
                    Rational::from_int(0),
                    "{} blamed on {:?}",
                    g.manager().display(e.poly()),
                    facts
                );
            }
        }

        #[test]
        fn contradiction_blames_both_facts(a in -5i64..5, b in -5i64..5, alg in algorithm()) {
            prop_assume!(a != b);
            let limit = ResLimit::new();
            let mut m = manager();
            let x = m.var(Var(1)).unwrap();
            let p = m.add_val(x, -a).unwrap();
            let q = m.add_val(x, -b).unwrap();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(Config { algorithm: alg, ..Config::default() });
            let d0 = g.dep_mut().leaf(0);
            let d1 = g.dep_mut().leaf(1);
            g.add_with(p, d0);
            g.add_with(q, d1);

            prop_assert_eq!(g.saturate(), Outcome::Conflict);
            let conflict = g.conflict().unwrap();
            prop_assert_eq!(g.dep().linearize(conflict.dep()), vec![0, 1]);
        }

        #[test]
        fn simplify_is_idempotent(sys in system()) {
            let limit = ResLimit::new();
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(Algorithm::Basic));
            load(&mut g, &sys.polys);

            g.simplify();
            let first: Vec<_> = g.equations().map(|e| (e.id(), e.poly(), e.state())).collect();
            g.simplify();
            let second: Vec<_> = g.equations().map(|e| (e.id(), e.poly(), e.state())).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn live_queues_hold_no_trivial_equation(sys in system(), alg in algorithm()) {
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(alg));
            load(&mut g, &sys.polys);
            g.saturate();

            for e in g.equations() {
                prop_assert!(!g.manager().is_zero(e.poly()));
            }
        }

        #[test]
        fn solved_equations_are_triangular(sys in system(), alg in algorithm()) {
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(bounded(alg));
            load(&mut g, &sys.polys);
            g.saturate();

            let conflict = g.conflict().map(|e| e.id());
            for &id in g.queue(EqState::Solved) {
                if Some(id) == conflict {
                    continue;
                }
                let p = g.equation(id).unwrap().poly();
                let mgr = g.manager();
                prop_assert!(mgr.hi_is_val(p));
                let top = mgr.top_var(p).unwrap();
                for v in mgr.free_vars(p) {
                    prop_assert!(v == top || mgr.level(v) < mgr.level(top));
                }
            }
        }

        #[test]
        fn threshold_is_respected(sys in system(), alg in algorithm(), threshold in 4usize..10) {
            prop_assume!(sys.polys.len() < threshold);
            let limit = ResLimit::with_max_steps(200);
            let mut m = manager();
            let mut g = Grobner::new(&limit, &mut m);
            g.set_config(Config { eqs_threshold: threshold, ..bounded(alg) });
            load(&mut g, &sys.polys);
            g.saturate();

            let pending = g.queue(EqState::ToSimplify).len() + g.queue(EqState::Processed).len();
            prop_assert!(pending <= threshold + 1);
        }
    }
}
