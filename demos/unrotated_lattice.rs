//! Lays out an unrotated surface code, exports it for Graphviz and lists the
//! X/Z check pairs whose compass schedule interferes.
//!
//! `cargo run --example unrotated_lattice > lattice.dot && fdp -Tsvg lattice.dot`

use surface_qec::{InitialState, SurfaceCode, SurfaceCodeError};

fn main() -> Result<(), SurfaceCodeError> {
    env_logger::init();

    let code = SurfaceCode::unrotated(5, 3, 1, InitialState::Zero)?;
    eprintln!("{}", code.lattice());
    eprintln!("{}", code.table());

    let conflicts = code.interleaving_conflicts();
    eprintln!("{} interleaving conflicts", conflicts.len());
    for conflict in &conflicts {
        eprintln!("  {}", conflict);
    }

    eprintln!("{}", code.program().diagram());
    println!("{}", code.graph().to_dot());
    Ok(())
}
