use std::collections::HashSet;

use crate::network::variables::Variable;

/// Directed graph over the network variables.
///
/// Starts out as the fixed network DAG; `mutilated` yields the graph of an
/// intervention, where the intervened variable loses its incoming edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    parents: [Vec<Variable>; Variable::COUNT],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Direction {
    /// Arrived from a child.
    Up,
    /// Arrived from a parent.
    Down,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::network()
    }
}

impl Topology {
    pub fn network() -> Topology {
        Topology {
            parents: std::array::from_fn(|i| Variable::ALL[i].parents().to_vec()),
        }
    }

    pub fn mutilated(&self, intervened: Variable) -> Topology {
        let mut parents = self.parents.clone();
        parents[intervened.index()].clear();
        Topology { parents }
    }

    pub fn parents(&self, variable: Variable) -> &[Variable] {
        &self.parents[variable.index()]
    }

    pub fn children(&self, variable: Variable) -> Vec<Variable> {
        Variable::ALL
            .iter()
            .copied()
            .filter(|child| self.parents(*child).contains(&variable))
            .collect()
    }

    pub fn edges(&self) -> Vec<(Variable, Variable)> {
        Variable::ALL
            .iter()
            .flat_map(|child| self.parents(*child).iter().map(move |parent| (*parent, *child)))
            .collect()
    }

    /// Ancestral closure of `variables`, the variables themselves included.
    pub fn ancestors_of(&self, variables: &[Variable]) -> HashSet<Variable> {
        let mut closure = HashSet::new();
        let mut stack: Vec<Variable> = variables.to_vec();
        while let Some(variable) = stack.pop() {
            if closure.insert(variable) {
                stack.extend_from_slice(self.parents(variable));
            }
        }
        closure
    }

    /// True when every variable in `xs` is d-separated from every variable
    /// in `ys` given `given`.
    pub fn d_separated(&self, xs: &[Variable], ys: &[Variable], given: &[Variable]) -> bool {
        xs.iter().all(|x| {
            let reachable = self.reachable(*x, given);
            ys.iter().all(|y| !reachable.contains(y))
        })
    }

    /// Bayes-ball: the variables with an active trail from `source` given
    /// `observed`.
    fn reachable(&self, source: Variable, observed: &[Variable]) -> HashSet<Variable> {
        let observed_ancestors = self.ancestors_of(observed);
        let is_observed = |v: Variable| observed.contains(&v);

        let mut visited = HashSet::new();
        let mut reachable = HashSet::new();
        let mut to_visit = vec![(source, Direction::Up)];
        while let Some((variable, direction)) = to_visit.pop() {
            if !visited.insert((variable, direction)) {
                continue;
            }
            if !is_observed(variable) {
                reachable.insert(variable);
            }
            match direction {
                Direction::Up if !is_observed(variable) => {
                    for parent in self.parents(variable) {
                        to_visit.push((*parent, Direction::Up));
                    }
                    for child in self.children(variable) {
                        to_visit.push((child, Direction::Down));
                    }
                }
                Direction::Up => {}
                Direction::Down => {
                    if !is_observed(variable) {
                        for child in self.children(variable) {
                            to_visit.push((child, Direction::Down));
                        }
                    }
                    // collider with an observed descendant
                    if observed_ancestors.contains(&variable) {
                        for parent in self.parents(variable) {
                            to_visit.push((*parent, Direction::Up));
                        }
                    }
                }
            }
        }
        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Variable::*;

    #[test]
    fn test_network_edges() {
        let topology = Topology::network();
        assert_eq!(topology.edges(), vec![(S, R), (S, G), (D, G), (G, L)]);
        assert_eq!(topology.children(S), vec![R, G]);
        assert!(topology.children(L).is_empty());
    }

    #[test]
    fn test_ancestors() {
        let topology = Topology::network();
        let ancestors = topology.ancestors_of(&[L]);
        assert_eq!(ancestors, HashSet::from([L, G, S, D]));
        assert_eq!(topology.ancestors_of(&[R]), HashSet::from([R, S]));
    }

    #[test]
    fn test_collider_blocks_until_observed() {
        let topology = Topology::network();
        assert!(topology.d_separated(&[R], &[D], &[]));
        assert!(!topology.d_separated(&[R], &[D], &[G]));
        assert!(!topology.d_separated(&[R], &[D], &[L]));
        assert!(topology.d_separated(&[S], &[D], &[]));
    }

    #[test]
    fn test_observed_fork_blocks() {
        let topology = Topology::network();
        assert!(!topology.d_separated(&[G], &[R], &[]));
        assert!(topology.d_separated(&[G], &[R], &[S]));
        assert!(topology.d_separated(&[L], &[S, D], &[G]));
    }

    #[test]
    fn test_mutilated_graph() {
        let topology = Topology::network().mutilated(G);
        assert!(topology.parents(G).is_empty());
        assert_eq!(topology.edges(), vec![(S, R), (G, L)]);
        assert!(topology.d_separated(&[R], &[G], &[]));
        assert!(!Topology::network().d_separated(&[R], &[G], &[]));
    }
}
