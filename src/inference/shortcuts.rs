use crate::inference::query::Query;
use crate::network::topology::Topology;

/// True when the query's answer is the plain marginal of its single target.
///
/// Observational queries: the target is d-separated from the evidence.
/// Interventional queries: in the mutilated graph the target is d-separated
/// from the intervened variable, and from the evidence given it.
pub fn reduces_to_marginal(topology: &Topology, query: &Query) -> bool {
    let [target] = query.targets() else {
        return false;
    };
    let evidence = query.evidence_variables();
    match query.intervention() {
        None => evidence.is_empty() || topology.d_separated(&[*target], &evidence, &[]),
        Some(intervention) => {
            let intervened = intervention.variable();
            let mutilated = topology.mutilated(intervened);
            mutilated.d_separated(&[*target], &[intervened], &[])
                && (evidence.is_empty()
                    || mutilated.d_separated(&[*target], &evidence, &[intervened]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::variables::{DValue, GValue, LValue, RValue, SValue, Variable};

    #[test]
    fn test_observational_shortcuts() {
        let topology = Topology::network();
        assert!(reduces_to_marginal(&topology, &Query::marginal([Variable::R])));
        assert!(reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::R]).given(DValue::D1)
        ));
        assert!(!reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::R]).given(DValue::D1).given(GValue::G2)
        ));
        assert!(!reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::G]).given(RValue::R1)
        ));
    }

    #[test]
    fn test_interventional_shortcuts() {
        let topology = Topology::network();
        assert!(reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::R]).intervene(GValue::G2)
        ));
        assert!(reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::G]).intervene(LValue::L1)
        ));
        // S causes G, so do(S) moves G
        assert!(!reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::G]).intervene(SValue::S0)
        ));
        // observing L still carries information about S
        assert!(!reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::R]).given(LValue::L1).intervene(DValue::D0)
        ));
    }

    #[test]
    fn test_joint_targets_never_shortcut() {
        let topology = Topology::network();
        assert!(!reduces_to_marginal(
            &topology,
            &Query::marginal([Variable::R, Variable::D])
        ));
    }
}
