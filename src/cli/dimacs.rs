use std::{io::BufReader, path::Path};

use otter_logic::{config::Config, context::Context, reports::Report, structures::atom::Atom};

use crate::CliError;

/// Reads the DIMACS file at `path` into a fresh context and solves, writing the result in the style of a SAT competition.
///
/// Returns the exit code for the result: 10 for satisfiable, 20 for unsatisfiable, and 30 for unknown.
pub fn solve_file(path: &Path, model: bool, config: Config) -> Result<i32, CliError> {
    let mut ctx = Context::from_config(config);

    println!("c Reading DIMACS file from {path:?}");
    let file = std::fs::File::open(path)?;

    let atom_map = match path.extension() {
        Some(extension) if extension == "xz" => read_xz(&mut ctx, &file)?,
        _ => ctx.read_dimacs(BufReader::new(&file))?,
    };

    let result = ctx.solve()?;
    println!("s {}", result.to_string().to_uppercase());

    if result == Report::Satisfiable && model {
        let mut variables = atom_map.into_iter().collect::<Vec<(isize, Atom)>>();
        variables.sort_unstable();
        let literals = variables
            .into_iter()
            .map(|(variable, atom)| match ctx.value_of(atom) {
                Some(false) => format!("-{variable}"),
                _ => variable.to_string(),
            })
            .collect::<Vec<_>>();
        println!("v {} 0", literals.join(" "));
    }

    Ok(result.exit_code())
}

#[cfg(feature = "xz")]
fn read_xz(
    ctx: &mut Context,
    file: &std::fs::File,
) -> Result<std::collections::HashMap<isize, Atom>, CliError> {
    Ok(ctx.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(file)))?)
}

#[cfg(not(feature = "xz"))]
fn read_xz(
    _ctx: &mut Context,
    _file: &std::fs::File,
) -> Result<std::collections::HashMap<isize, Atom>, CliError> {
    Err(CliError::Unsupported(
        "reading xz compressed files requires the xz feature",
    ))
}
