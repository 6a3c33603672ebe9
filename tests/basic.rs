use otter_logic::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    reports::Report,
    structures::literal::{CLiteral, Literal},
};

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut the_context = Context::from_config(Config::default());
        let p_clause = the_context.clause_from_string("p").unwrap();
        assert!(the_context.add_clause(p_clause).is_ok());
        assert!(the_context.solve().is_ok());
        assert_eq!(the_context.report(), Report::Satisfiable)
    }

    #[test]
    fn conflict() {
        let mut the_context = Context::from_config(Config::default());
        for clause in ["p q", "-p -q", "p -q", "-p q"] {
            let clause = the_context.clause_from_string(clause).unwrap();
            assert!(the_context.add_clause(clause).is_ok());
        }

        assert!(the_context.solve().is_ok());
        assert_eq!(the_context.report(), Report::Unsatisfiable)
    }

    #[test]
    fn unit_fixes_value() {
        let mut the_context = Context::from_config(Config::default());

        let p_q_clause = the_context.clause_from_string("p q").unwrap();
        assert!(the_context.add_clause(p_q_clause).is_ok());

        let not_p = the_context.clause_from_string("-p").unwrap();
        assert!(the_context.add_clause(not_p).is_ok());

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let the_valuation = the_context.valuation_string();
        assert!(the_valuation.contains("-p"));
        assert!(the_valuation.contains("q"));
    }

    #[test]
    fn duplicates() {
        let mut the_context = Context::from_config(Config::default());
        let p_q_q_clause = the_context.clause_from_string("p q q").unwrap();
        assert_eq!(the_context.add_clause(p_q_q_clause), Ok(ClauseOk::Added));
        assert_eq!(the_context.clause_db.original_count(), 1);

        let (_, stored) = the_context.clause_db.all_clauses().next().unwrap();
        assert_eq!(stored.literals.len(), 2);
    }

    #[test]
    fn tautology_skip() {
        let mut the_context = Context::from_config(Config::default());
        let clause = the_context.clause_from_string("p q -p").unwrap();
        assert_eq!(the_context.add_clause(clause), Ok(ClauseOk::Tautology));
        assert_eq!(the_context.clause_db.original_count(), 0);
    }

    #[test]
    fn satisfied_skip() {
        let mut the_context = Context::from_config(Config::default());
        let p = the_context.clause_from_string("p").unwrap();
        assert!(the_context.add_clause(p).is_ok());
        let clause = the_context.clause_from_string("p q").unwrap();
        assert_eq!(the_context.add_clause(clause), Ok(ClauseOk::Satisfied));
    }

    #[test]
    fn clauses_after_a_solve() {
        let mut the_context = Context::from_config(Config::default());
        let p_q_clause = the_context.clause_from_string("p q").unwrap();
        assert!(the_context.add_clause(p_q_clause).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let not_p = the_context.clause_from_string("-p").unwrap();
        assert!(the_context.add_clause(not_p).is_ok());
        let not_q = the_context.clause_from_string("-q").unwrap();
        assert!(the_context.add_clause(not_q).is_ok());

        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));

        let r = the_context.clause_from_string("r").unwrap();
        assert!(the_context.add_clause(r).is_err());
    }
}

mod pigeonhole {
    use super::*;

    /// Clauses stating each of `pigeons` pigeons has one of `holes` holes, and no two pigeons share a hole.
    fn pigeonhole(pigeons: usize, holes: usize, config: Config) -> Context {
        let mut the_context = Context::from_config(config);

        let mut sits = vec![vec![CLiteral::TOP; holes]; pigeons];
        for pigeon in sits.iter_mut() {
            for hole in pigeon.iter_mut() {
                *hole = CLiteral::new(the_context.fresh_atom().unwrap(), true);
            }
            assert!(the_context.add_clause(pigeon.clone()).is_ok());
        }

        for hole in 0..holes {
            for a in 0..pigeons {
                for b in a + 1..pigeons {
                    let clause = vec![-sits[a][hole], -sits[b][hole]];
                    assert!(the_context.add_clause(clause).is_ok());
                }
            }
        }
        the_context
    }

    #[test]
    fn fits() {
        let mut the_context = pigeonhole(5, 5, Config::default());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn does_not_fit() {
        let mut the_context = pigeonhole(6, 5, Config::default());
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn does_not_fit_without_restarts() {
        let mut config = Config::default();
        config.restart.value = false;
        config.reduction.value = false;
        let mut the_context = pigeonhole(6, 5, config);
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn does_not_fit_with_preprocessing_and_randomness() {
        let mut config = Config::default();
        config.preprocessing.value = true;
        config.random_decision_bias.value = 0.1;
        config.polarity_lean.value = 0.5;
        let mut the_context = pigeonhole(5, 4, config);
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn time_limit() {
        let mut config = Config::default();
        assert!(config.time_limit.set(std::time::Duration::from_millis(1)).is_ok());
        let mut the_context = pigeonhole(11, 10, config);

        assert_eq!(the_context.solve(), Ok(Report::Unknown));
        assert_eq!(the_context.report(), Report::Unknown);
        assert!(the_context.counters.time >= std::time::Duration::from_millis(1));
    }
}
