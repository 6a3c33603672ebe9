use std::{
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use otter_logic::{config::Config, context::Context, reports::Report};

fn cnf_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("cnf")
}

fn formula_report(path: &Path, config: Config) -> Report {
    let mut the_context = Context::from_config(config);
    let file = fs::File::open(path).unwrap_or_else(|_| panic!("{path:?} missing"));
    the_context
        .read_dimacs(BufReader::new(file))
        .unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));
    the_context.solve().unwrap_or_else(|e| panic!("failed to solve {path:?}: {e}"))
}

/// Formulas named sat_* are satisfiable, and those named unsat_* unsatisfiable.
fn check_collection(config: &Config) {
    let mut satisfiable = 0;
    let mut unsatisfiable = 0;

    let pattern = cnf_dir().join("*.cnf");
    for entry in glob::glob(pattern.to_str().unwrap()).expect("bad glob") {
        let path = entry.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap().to_owned();

        if name.starts_with("sat_") {
            assert_eq!(formula_report(&path, config.clone()), Report::Satisfiable, "{name}");
            satisfiable += 1;
        } else if name.starts_with("unsat_") {
            assert_eq!(formula_report(&path, config.clone()), Report::Unsatisfiable, "{name}");
            unsatisfiable += 1;
        }
    }

    assert_eq!(satisfiable, 2);
    assert_eq!(unsatisfiable, 3);
}

#[test]
fn collection_default() {
    check_collection(&Config::default());
}

#[test]
fn collection_without_restarts() {
    let mut config = Config::default();
    config.restart.value = false;
    check_collection(&config);
}

#[test]
fn collection_with_preprocessing() {
    let mut config = Config::default();
    config.preprocessing.value = true;
    check_collection(&config);
}

#[test]
fn atoms_are_named_by_variable() {
    let mut the_context = Context::from_config(Config::default());
    let file = fs::File::open(cnf_dir().join("sat_chain.cnf")).unwrap();
    let atom_map = the_context.read_dimacs(BufReader::new(file)).unwrap();

    assert_eq!(atom_map.len(), 5);
    assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

    for variable in 1..=5 {
        let atom = atom_map[&variable];
        assert_eq!(the_context.atom_db.atom_of(&variable.to_string()), Some(atom));
        assert_eq!(the_context.value_of(atom), Some(true));
    }
}

#[test]
fn unterminated_clause() {
    let mut the_context = Context::from_config(Config::default());
    let dimacs = "p cnf 2 1\n1 -2\n";
    assert!(the_context.read_dimacs(dimacs.as_bytes()).is_err());
}

#[test]
fn malformed_literal() {
    let mut the_context = Context::from_config(Config::default());
    let dimacs = "p cnf 2 1\n1 x 0\n";
    assert!(the_context.read_dimacs(dimacs.as_bytes()).is_err());
}

#[test]
fn percent_ends_input() {
    let mut the_context = Context::from_config(Config::default());
    let dimacs = "p cnf 1 1\n1 0\n%\n0\n";
    assert!(the_context.read_dimacs(dimacs.as_bytes()).is_ok());
    assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
}
