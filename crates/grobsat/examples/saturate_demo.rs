//! Saturates a small nonlinear system and prints the result.
//!
//! Run with `RUST_LOG=grobsat_engine=debug` to trace the steps.

use grobsat::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), PolyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let limit = ResLimit::new();
    let mut m = PolyManager::new();
    let x = m.mk_var_named("x");
    let y = m.mk_var_named("y");
    let z = m.mk_var_named("z");
    let (x, y, z) = (m.var(x)?, m.var(y)?, m.var(z)?);

    // x*y = 1, y*z = x, z = 2
    let xy = m.mul(x, y)?;
    let p0 = m.add_val(xy, -1)?;
    let yz = m.mul(y, z)?;
    let p1 = m.sub(yz, x)?;
    let p2 = m.add_val(z, -2)?;

    let mut g = Grobner::new(&limit, &mut m);
    for (fact, p) in [p0, p1, p2].into_iter().enumerate() {
        let d = g.dep_mut().leaf(fact as u32);
        g.add_with(p, d);
    }
    g.set_print_dep(|d, out| write!(out, "#{}", d.index()));

    let outcome = g.saturate();
    println!("outcome: {outcome:?}");
    print!("{g}");

    let mut st = Statistics::new();
    g.collect_statistics(&mut st);
    print!("{st}");
    Ok(())
}
