use otter_logic::{
    config::Config,
    first_order::{CheckResult, Entailment, Script, Solver, Value},
    types::err::{ErrorKind, FirstOrderError},
};

const SOCRATES: &str = "Human = DeclareSort('Human')
    socrates, x = Consts('socrates x', Human)
    human = Function('human', Human, BoolSort())
    mortal = Function('mortal', Human, BoolSort())";

fn solver_with(text: &str, config: Config) -> Solver {
    let script = Script::parse(text).unwrap_or_else(|e| panic!("failed to parse: {e}"));
    Solver::from_script(script, config)
}

fn solver(text: &str) -> Solver {
    solver_with(text, Config::default())
}

/// Each assertion of the solver is true on the model of the most recent check.
fn model_satisfies(solver: &Solver) {
    let model = solver.model().unwrap();
    for assertion in solver.assertions() {
        assert_eq!(model.evaluate(assertion), Ok(true), "{assertion}");
    }
}

mod entailment {
    use super::*;

    #[test]
    fn socrates_is_mortal() {
        let text = format!("{SOCRATES}\nForAll([x], Implies(human(x), mortal(x)))\nhuman(socrates)");
        let script = Script::parse(&text).unwrap();
        let conjecture = script.formula("mortal(socrates)").unwrap();

        let mut solver = Solver::from_script(script, Config::default());
        assert_eq!(solver.entails(conjecture), Ok(Entailment::Valid));
        assert_eq!(solver.scope_depth(), 0);
        assert_eq!(solver.assertions().len(), 2);
    }

    #[test]
    fn without_humanity() {
        let text = format!("{SOCRATES}\nForAll([x], Implies(human(x), mortal(x)))");
        let script = Script::parse(&text).unwrap();
        let conjecture = script.formula("mortal(socrates)").unwrap();

        let mut solver = Solver::from_script(script, Config::default());
        match solver.entails(conjecture.clone()) {
            Ok(Entailment::Invalid(model)) => {
                assert_eq!(model.evaluate(&conjecture), Ok(false));
                assert_eq!(model.evaluate(&solver.assertions()[0]), Ok(true));
            }
            other => panic!("expected a counterexample, found {other:?}"),
        }
    }
}

mod uninterpreted {
    use super::*;

    #[test]
    fn models_are_verified() {
        let mut s = solver(
            "H = DeclareSort('H')
             a, b, x, y = Consts('a b x y', H)
             R = Function('R', H, H, BoolSort())
             R(a, b)
             Not(R(b, a))
             ForAll([x], Not(R(x, x)))
             ForAll([x, y], Implies(R(x, y), Not(R(y, x))))",
        );
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        model_satisfies(&s);

        let model = s.model().unwrap();
        assert_ne!(model.get("a"), model.get("b"));
        assert_eq!(model.universe("H").len(), 2);
    }

    #[test]
    fn distinct_beyond_the_domain_limit() {
        let mut config = Config::default();
        config.domain_limit.value = 2;

        let mut s = solver_with(
            "H = DeclareSort('H')
             a, b, c = Consts('a b c', H)
             Distinct(a, b, c)",
            config,
        );
        assert_eq!(s.check(), Ok(CheckResult::Unknown));
        assert!(s.reason_unknown().unwrap().contains("at most 2 elements"));

        s.config.domain_limit.value = 3;
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert!(s.reason_unknown().is_none());
        model_satisfies(&s);
    }

    #[test]
    fn functions() {
        let mut s = solver(
            "H = DeclareSort('H')
             a, x = Consts('a x', H)
             f = Function('f', H, H)
             f(a) != a
             ForAll([x], f(f(x)) == x)",
        );
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        model_satisfies(&s);
        assert!(s.model().unwrap().functions.contains_key("f"));
    }

    #[test]
    fn scopes_and_models() {
        let mut s = solver(&format!("{SOCRATES}\nhuman(socrates)"));
        assert_eq!(s.model(), Err(ErrorKind::FirstOrder(FirstOrderError::NoModel)));

        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert!(s.model().is_ok());

        s.push();
        let negation = Script::parse(&format!("{SOCRATES}\nNot(human(socrates))")).unwrap();
        for assertion in negation.assertions {
            s.add(assertion);
        }
        assert!(s.model().is_err());
        assert_eq!(s.check(), Ok(CheckResult::Unsat));

        assert_eq!(s.pop(), Ok(()));
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert_eq!(s.pop(), Err(ErrorKind::FirstOrder(FirstOrderError::PopEmpty)));
    }
}

mod integers {
    use super::*;

    #[test]
    fn sum() {
        let mut s = solver(
            "x, y = Ints('x y')
             x + y == 10
             x > y
             y > 0",
        );
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        model_satisfies(&s);

        let model = s.model().unwrap();
        match (model.get("x"), model.get("y")) {
            (Some(Value::Int(x)), Some(Value::Int(y))) => {
                assert_eq!(x + y, 10);
                assert!(x > y && *y > 0);
            }
            other => panic!("expected integers, found {other:?}"),
        }
    }

    #[test]
    fn products_and_differences() {
        let mut s = solver(
            "x, y = Ints('x y')
             x * y == 12
             x - y == 1",
        );
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        model_satisfies(&s);
    }

    #[test]
    fn bounded_search() {
        let mut s = solver("x = Int('x')\nx > 5\nx < 3");
        assert_eq!(s.check(), Ok(CheckResult::Unknown));
        assert!(s.reason_unknown().unwrap().contains("bits"));
    }
}

mod scripts {
    use super::*;

    #[test]
    fn sort_errors() {
        assert!(Script::parse("x = Int('x')\nP = Bool('P')\nx == P").is_err());
        assert!(Script::parse("H = DeclareSort('H')\na = Const('a', H)\na + 1 == 2").is_err());
    }

    #[test]
    fn unknown_names() {
        assert!(Script::parse("P = Bool('P')\nAnd(P, Q)").is_err());
    }

    #[test]
    fn solver_statements() {
        let script = Script::parse(
            "P, Q = Bools('P Q')
             s = Solver()
             s.add(P, Implies(P, Q))
             s.check()",
        )
        .unwrap();
        assert_eq!(script.assertions.len(), 2);

        let mut s = Solver::from_script(script, Config::default());
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert_eq!(s.model().unwrap().get("Q"), Some(&Value::Bool(true)));
    }
}
