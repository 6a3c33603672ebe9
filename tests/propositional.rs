use otter_logic::{
    config::Config,
    propositional::{
        all_models, entails, equivalent, is_cnf, is_dnf, is_nnf, is_tautology, parse,
        satisfiable, simplify_logic, to_cnf, to_dnf, to_nnf, truth_table, Expr, NormalForm,
    },
    types::err::{ErrorKind, TransformError},
};

const FORMULAS: [&str; 8] = [
    "(P >> Q) & (Q >> R)",
    "~(P & Q) | (R ^ P)",
    "Equivalent(P, Q, R)",
    "ITE(P, Q, ~R)",
    "Xor(P, Q, R, S)",
    "Nand(P, Q) & Nor(R, S)",
    "(P | Q) & (P | ~Q) & (~P | R)",
    "P << (Q & R)",
];

fn expr(text: &str) -> Expr {
    parse(text).unwrap_or_else(|e| panic!("failed to parse {text}: {e}"))
}

mod normal_forms {
    use super::*;

    #[test]
    fn forms_are_equivalent() {
        let config = Config::default();
        for text in FORMULAS {
            let formula = expr(text);

            let nnf = to_nnf(&formula);
            assert!(is_nnf(&nnf), "{text}");
            assert!(equivalent(&formula, &nnf, &config).unwrap(), "{text}");

            for simplify in [false, true] {
                let cnf = to_cnf(&formula, simplify, &config).unwrap();
                assert!(is_cnf(&cnf), "{text} as {cnf}");
                assert!(equivalent(&formula, &cnf, &config).unwrap(), "{text}");

                let dnf = to_dnf(&formula, simplify, &config).unwrap();
                assert!(is_dnf(&dnf), "{text} as {dnf}");
                assert!(equivalent(&formula, &dnf, &config).unwrap(), "{text}");
            }
        }
    }

    #[test]
    fn chain() {
        let config = Config::default();
        let cnf = to_cnf(&expr("(P >> Q) & (Q >> R)"), false, &config).unwrap();
        assert_eq!(cnf.to_string(), "(Q | ~P) & (R | ~Q)");
    }

    #[test]
    fn de_morgan() {
        assert_eq!(to_nnf(&expr("~(P & Q)")).to_string(), "~P | ~Q");
        assert!(is_nnf(&to_nnf(&expr("~(P | ~(Q & ~R))"))));
    }

    #[test]
    fn blowup() {
        let mut config = Config::default();
        config.cnf_clause_limit.value = 4;
        let formula = expr("(A & B) | (C & D) | (E & F)");
        assert_eq!(
            to_cnf(&formula, false, &config),
            Err(ErrorKind::Transform(TransformError::Blowup { limit: 4 }))
        );
    }
}

mod minimisation {
    use super::*;

    #[test]
    fn minimal_forms() {
        let config = Config::default();
        for text in FORMULAS {
            let formula = expr(text);
            for form in [NormalForm::Cnf, NormalForm::Dnf] {
                let simplified = simplify_logic(&formula, Some(form), false, &config).unwrap();
                assert!(equivalent(&formula, &simplified, &config).unwrap(), "{text}");
                match form {
                    NormalForm::Cnf => assert!(is_cnf(&simplified), "{text} as {simplified}"),
                    NormalForm::Dnf => assert!(is_dnf(&simplified), "{text} as {simplified}"),
                }
            }
        }
    }

    #[test]
    fn absorption() {
        let config = Config::default();
        let simplified = simplify_logic(&expr("(P & Q) | (P & ~Q)"), None, false, &config).unwrap();
        assert_eq!(simplified, Expr::atom("P"));

        let simplified = simplify_logic(&expr("(P | Q) & (P | ~Q)"), None, false, &config).unwrap();
        assert_eq!(simplified, Expr::atom("P"));
    }

    #[test]
    fn constants() {
        let config = Config::default();
        assert_eq!(simplify_logic(&expr("P | ~P"), None, false, &config), Ok(Expr::True));
        assert_eq!(
            simplify_logic(&expr("(P | Q) & ~P & ~Q"), None, false, &config),
            Ok(Expr::False)
        );
    }

    #[test]
    fn atom_limit() {
        let mut config = Config::default();
        config.simplify_atom_limit.value = 2;
        let formula = expr("(P & Q) | (P & ~Q) | R");

        let unchanged = simplify_logic(&formula, None, false, &config).unwrap();
        assert_eq!(unchanged, formula);

        let forced = simplify_logic(&formula, None, true, &config).unwrap();
        assert_eq!(forced.to_string(), "P | R");
    }
}

mod satisfiability {
    use super::*;

    #[test]
    fn models_satisfy() {
        let config = Config::default();
        for text in FORMULAS {
            let formula = expr(text);
            let model = satisfiable(&formula, &config).unwrap().unwrap();
            assert!(formula.evaluate_on(model.as_map()), "{text}");
        }
    }

    #[test]
    fn model_count_matches_table() {
        let config = Config::default();
        for text in FORMULAS {
            let formula = expr(text);
            let table = truth_table(&formula, &config).unwrap();
            let models = all_models(&formula, usize::MAX, &config).unwrap();
            assert_eq!(models.len(), table.true_count(), "{text}");
        }
    }

    #[test]
    fn model_limit() {
        let config = Config::default();
        let models = all_models(&expr("P | Q | R"), 3, &config).unwrap();
        assert_eq!(models.len(), 3);
    }

    #[test]
    fn contradiction() {
        let config = Config::default();
        assert_eq!(satisfiable(&expr("(P | Q) & ~P & ~Q"), &config), Ok(None));
        assert!(all_models(&expr("(P | Q) & ~P & ~Q"), 10, &config).unwrap().is_empty());
    }

    #[test]
    fn tautologies() {
        let config = Config::default();
        assert!(is_tautology(&expr("P | ~P"), &config).unwrap());
        assert!(is_tautology(&expr("((P >> Q) & P) >> Q"), &config).unwrap());
        assert!(!is_tautology(&expr("(P >> Q) >> P"), &config).unwrap());
    }

    #[test]
    fn modus_tollens() {
        let config = Config::default();
        let premises = [expr("P >> Q"), expr("~Q")];
        assert!(entails(&premises, &expr("~P"), &config).unwrap());
        assert!(!entails(&premises, &expr("P"), &config).unwrap());
    }
}

mod tables {
    use super::*;

    #[test]
    fn xor_table() {
        let table = truth_table(&expr("P ^ Q"), &Config::default()).unwrap();
        assert_eq!(table.atoms, vec!["P".to_string(), "Q".to_string()]);
        let results = table.rows.iter().map(|row| row.result).collect::<Vec<_>>();
        assert_eq!(results, vec![false, true, true, false]);
    }

    #[test]
    fn too_many_atoms() {
        let mut config = Config::default();
        config.simplify_atom_limit.value = 3;
        assert!(truth_table(&expr("A | B | C | D"), &config).is_err());
    }
}
