#[cfg(test)]
mod test_random_networks {
    use exactbayes::inference::{EvaluatorOptions, Query, QueryEvaluator, SummationScope};
    use exactbayes::network::{
        DValue, GValue, LValue, NetworkConfig, NetworkModel, RValue, SValue, Variable,
    };
    use rand::Rng;

    const TOLERANCE: f64 = 1e-9;
    const NETWORKS: usize = 25;

    fn random_row(size: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        // bounded away from zero so no evidence becomes impossible
        let raw: Vec<f64> = (0..size).map(|_| rng.r#gen::<f64>() + 0.05).collect();
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|p| p / total).collect()
    }

    fn random_config() -> NetworkConfig {
        NetworkConfig {
            p_s: random_row(2),
            p_d: random_row(2),
            p_r_given_s: (0..2).map(|_| random_row(2)).collect(),
            p_g_given_sd: (0..2)
                .map(|_| (0..2).map(|_| random_row(3)).collect())
                .collect(),
            p_l_given_g: (0..3).map(|_| random_row(2)).collect(),
        }
    }

    fn evaluators(config: &NetworkConfig) -> (QueryEvaluator, QueryEvaluator) {
        let network = NetworkModel::new_shared(config).unwrap();
        let full = QueryEvaluator::new(
            network.clone(),
            EvaluatorOptions {
                scope: SummationScope::FullJoint,
                use_shortcuts: false,
            },
        )
        .unwrap();
        let ancestral = QueryEvaluator::new(
            network,
            EvaluatorOptions {
                scope: SummationScope::Ancestral,
                use_shortcuts: true,
            },
        )
        .unwrap();
        (full, ancestral)
    }

    fn sample_queries() -> Vec<Query> {
        vec![
            Query::marginal([Variable::G]),
            Query::marginal([Variable::G]).given(RValue::R1),
            Query::marginal([Variable::G]).given(RValue::R0).given(SValue::S0),
            Query::marginal([Variable::R]).given(DValue::D1),
            Query::marginal([Variable::R]).given(DValue::D0).given(GValue::G2),
            Query::marginal([Variable::R]).given(DValue::D1).given(LValue::L1),
            Query::marginal([Variable::R]).intervene(GValue::G2),
            Query::marginal([Variable::G]).intervene(LValue::L1),
            Query::marginal([Variable::S, Variable::L]).given(RValue::R1),
            Query::probability_of(GValue::G1).given(LValue::L1),
        ]
    }

    #[test]
    fn test_random_tables_are_accepted_and_normalized() {
        for _ in 0..NETWORKS {
            let (full, _) = evaluators(&random_config());
            assert!((full.total_mass() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_scopes_and_shortcuts_agree() {
        for _ in 0..NETWORKS {
            let (full, ancestral) = evaluators(&random_config());
            for query in sample_queries() {
                let a = full.evaluate_detailed(&query).unwrap();
                let b = ancestral.evaluate_detailed(&query).unwrap();
                assert!(a.distribution.approx_eq(&b.distribution, TOLERANCE), "{}", query);
                assert!((a.evidence_probability - b.evidence_probability).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_structural_independences_hold() {
        for _ in 0..NETWORKS {
            let (full, _) = evaluators(&random_config());
            let p_r = full.marginal(Variable::R).clone();
            let p_g = full.marginal(Variable::G).clone();
            for d in DValue::ALL {
                let answer = full.evaluate(&Query::marginal([Variable::R]).given(*d)).unwrap();
                assert!(answer.distribution().unwrap().approx_eq(&p_r, TOLERANCE));
            }
            for g in GValue::ALL {
                let answer = full.evaluate(&Query::marginal([Variable::R]).intervene(*g)).unwrap();
                assert!(answer.distribution().unwrap().approx_eq(&p_r, TOLERANCE));
            }
            for l in LValue::ALL {
                let answer = full.evaluate(&Query::marginal([Variable::G]).intervene(*l)).unwrap();
                assert!(answer.distribution().unwrap().approx_eq(&p_g, TOLERANCE));
            }
        }
    }

    #[test]
    fn test_bayes_round_trip() {
        for _ in 0..NETWORKS {
            let (full, _) = evaluators(&random_config());
            for query in sample_queries() {
                let evaluation = full.evaluate_detailed(&query).unwrap();
                let recovered = evaluation.distribution.scaled(evaluation.evidence_probability);
                assert!(recovered.approx_eq(&evaluation.joint, TOLERANCE), "{}", query);
            }
        }
    }

    #[test]
    fn test_unnormalized_table_rejected() {
        let mut config = random_config();
        config.p_g_given_sd[1][0] = vec![0.5, 0.5, 0.5];
        assert!(NetworkModel::new(&config).is_err());
    }
}
