use otter_logic::{
    config::Config,
    first_order::{CheckResult, Entailment, Value},
    lab::{
        first_order::{
            analyse_quantified, arithmetic, socrates, solve_problem, Problem, Quantifier,
        },
        propositional::{analyse, EXAMPLES},
    },
};

mod propositional {
    use super::*;

    #[test]
    fn analyses_as_json() {
        let config = Config::default();
        for example in EXAMPLES {
            let analysis = analyse(example, &config).unwrap();
            let json = serde_json::to_value(&analysis).unwrap();

            for key in ["input", "cnf", "dnf", "simplified", "satisfiable"] {
                assert!(json.get(key).is_some(), "{example} lacks {key}");
            }
            assert_eq!(json["satisfiable"].is_null(), analysis.satisfiable.is_none());
        }
    }

    #[test]
    fn display() {
        let analysis = analyse("P & ~P", &Config::default()).unwrap();
        let text = analysis.to_string();
        assert!(text.starts_with("Input:        False"));
        assert!(text.ends_with("Satisfiable:  Unsatisfiable"));
    }
}

mod first_order {
    use super::*;

    #[test]
    fn quantifiers_as_json() {
        let config = Config::default();
        for kind in [
            Quantifier::Universal,
            Quantifier::Existential,
            Quantifier::Combined,
        ] {
            let analysis = analyse_quantified(kind, None, &config).unwrap();
            let json = serde_json::to_value(&analysis).unwrap();
            assert_eq!(json["result"], "sat");
            assert_eq!(json["kind"], kind.to_string().to_lowercase());
            assert!(json["model"].is_object());
        }
    }

    #[test]
    fn inconsistent_quantifier() {
        let analysis = analyse_quantified(
            Quantifier::Combined,
            Some("And(ForAll([x], P(x)), Exists([y], Not(P(y))))"),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(analysis.result, CheckResult::Unsat);
        assert!(analysis
            .to_string()
            .ends_with("The formula is inconsistent or undetermined."));
    }

    #[test]
    fn problems() {
        let config = Config::default();

        let contradiction = solve_problem(Problem::Contradiction.formula(), &config).unwrap();
        assert_eq!(contradiction.result, CheckResult::Unsat);
        assert!(contradiction.model.is_none());
        assert!(contradiction.to_string().ends_with("The formula is unsatisfiable"));

        let tautology = solve_problem(Problem::Tautology.formula(), &config).unwrap();
        assert_eq!(tautology.result, CheckResult::Sat);

        let modus_ponens = solve_problem(Problem::ModusPonens.formula(), &config).unwrap();
        let model = modus_ponens.model.unwrap();
        assert_eq!(model.get("Q"), Some(&Value::Bool(true)));
    }

    #[test]
    fn declarations_within_problems() {
        let solution = solve_problem(
            "x = Int('x')\nAnd(P, x > 2, x < 4)",
            &Config::default(),
        )
        .unwrap();
        assert_eq!(solution.result, CheckResult::Sat);
        assert!(solution.to_string().ends_with("P = True\nx = 3"));

        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["model"]["x"], 3);
        assert_eq!(json["model"]["P"], "True");
    }

    #[test]
    fn syllogism() {
        let syllogism = socrates(&Config::default()).unwrap();
        assert_eq!(syllogism.entailment, Entailment::Valid);
        assert_eq!(syllogism.conjecture, "mortal(socrates)");
        assert!(syllogism.to_string().contains("socrates is mortal"));
    }

    #[test]
    fn sums() {
        let solution = arithmetic(&Config::default()).unwrap();
        assert_eq!(solution.result, CheckResult::Sat);

        let (x, y) = (solution.x.unwrap(), solution.y.unwrap());
        assert_eq!(x + y, 10);
        assert!(x > y && y > 0);
        assert_eq!(solution.to_string(), format!("Solution found: x = {x}, y = {y}"));
    }
}
