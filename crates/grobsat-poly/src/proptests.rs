//! Property-based tests for polynomial arithmetic and reduction.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::manager::{Pdd, PolyManager};
    use crate::monomial::{Monomial, Var};
    use crate::poly::Poly;
    use crate::rational::Rational;

    const NUM_VARS: u32 = 3;

    // Strategy for small monomials over three variables
    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec((0..NUM_VARS, 0u32..3), 0..3).prop_map(|powers| {
            let powers: Vec<(Var, u32)> = powers.into_iter().map(|(v, e)| (Var(v), e)).collect();
            Monomial::from_powers(&powers)
        })
    }

    // Strategy for small sparse polynomials
    fn small_poly() -> impl Strategy<Value = Poly> {
        proptest::collection::vec((small_monomial(), -5i64..5), 0..5).prop_map(|terms| {
            Poly::from_terms(
                terms
                    .into_iter()
                    .map(|(m, c)| (m, Rational::from_int(c)))
                    .collect(),
            )
        })
    }

    fn small_point() -> impl Strategy<Value = Vec<Rational>> {
        proptest::collection::vec(-4i64..4, NUM_VARS as usize)
            .prop_map(|v| v.into_iter().map(Rational::from_int).collect())
    }

    fn manager() -> PolyManager {
        let mut m = PolyManager::new();
        for _ in 0..NUM_VARS {
            m.mk_var();
        }
        m
    }

    fn intern(m: &mut PolyManager, p: Poly) -> Pdd {
        m.mk(p).expect("no budget configured")
    }

    proptest! {
        #[test]
        fn poly_canonical_form(p in small_poly()) {
            let terms = p.terms();
            prop_assert!(terms.windows(2).all(|w| w[0].0 > w[1].0));
            prop_assert!(terms.iter().all(|(_, c)| !num_traits::Zero::is_zero(c)));
        }

        #[test]
        fn poly_mul_distributes(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_eval_is_homomorphic(a in small_poly(), b in small_poly(), pt in small_point()) {
            prop_assert_eq!(a.mul(&b).eval(&pt), &a.eval(&pt) * &b.eval(&pt));
            prop_assert_eq!(a.sub(&b).eval(&pt), &a.eval(&pt) - &b.eval(&pt));
        }

        #[test]
        fn interning_is_canonical(a in small_poly(), b in small_poly()) {
            let mut m = manager();
            let (pa, pb) = (intern(&mut m, a.clone()), intern(&mut m, b.clone()));
            prop_assert_eq!(pa == pb, a == b);
            let s1 = m.add(pa, pb).unwrap();
            let s2 = m.add(pb, pa).unwrap();
            prop_assert_eq!(s1, s2);
        }

        #[test]
        fn reduce_preserves_ideal_membership(a in small_poly(), b in small_poly(), pt in small_point()) {
            // a - reduce(a, b) is a multiple of b, so they agree on the zeros of b
            let mut m = manager();
            let (pa, pb) = (intern(&mut m, a.clone()), intern(&mut m, b.clone()));
            let r = m.reduce(pa, pb).unwrap();
            if m.eval(pb, &pt) == Rational::from_int(0) {
                prop_assert_eq!(m.eval(r, &pt), a.eval(&pt));
            }
        }

        #[test]
        fn reduce_leaves_no_divisible_term(a in small_poly(), b in small_poly()) {
            let mut m = manager();
            let (pa, pb) = (intern(&mut m, a), intern(&mut m, b));
            let r = m.reduce(pa, pb).unwrap();
            if let Some(lm) = m.leading_monomial(pb).cloned() {
                prop_assert!(m.poly(r).terms().iter().all(|(t, _)| !t.is_divisible_by(&lm)));
            }
        }

        #[test]
        fn spoly_vanishes_on_common_zeros(a in small_poly(), b in small_poly(), pt in small_point()) {
            let mut m = manager();
            let (pa, pb) = (intern(&mut m, a), intern(&mut m, b));
            if let Some(s) = m.try_spoly(pa, pb).unwrap() {
                let zero = Rational::from_int(0);
                if m.eval(pa, &pt) == zero && m.eval(pb, &pt) == zero {
                    prop_assert_eq!(m.eval(s, &pt), zero);
                }
            }
        }

        #[test]
        fn compare_is_total(a in small_poly(), b in small_poly()) {
            let mut m = manager();
            let (pa, pb) = (intern(&mut m, a), intern(&mut m, b));
            prop_assert_eq!(m.compare(pa, pb), m.compare(pb, pa).reverse());
            prop_assert_eq!(m.compare(pa, pb) == std::cmp::Ordering::Equal, pa == pb);
        }
    }
}
