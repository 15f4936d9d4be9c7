//! World enumeration: every complete assignment consistent with an event.
//!
//! Free variables (those the event leaves unassigned) are expanded in
//! declaration order. Expanding a variable replaces each world in the
//! collection with one copy per domain value, value-major, so the first free
//! variable varies fastest. [`Worlds`] walks the same sequence lazily as a
//! mixed-radix odometer; [`generate_worlds`] materialises it.
//!
//! The number of worlds is the product of the free variables' domain sizes.
//! This is exponential by nature; callers bound network size.

use crate::network::{Network, VarIndex};

/// A partial assignment over network variables, by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    values: Vec<Option<usize>>,
}

impl Event {
    /// An event that assigns nothing, over `len` variables.
    pub fn empty(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, var: VarIndex) -> Option<usize> {
        self.values[var]
    }

    pub fn set(&mut self, var: VarIndex, value: usize) {
        self.values[var] = Some(value);
    }

    pub fn is_assigned(&self, var: VarIndex) -> bool {
        self.values[var].is_some()
    }

    /// Assigned `(variable, value)` pairs in declaration order.
    pub fn assigned(&self) -> impl Iterator<Item = (VarIndex, usize)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(var, value)| value.map(|v| (var, v)))
    }

    /// Unassigned variables in declaration order.
    pub fn free_variables(&self) -> impl Iterator<Item = VarIndex> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_none())
            .map(|(var, _)| var)
    }

    /// Merge two events. Where both assign a variable, `other` wins.
    pub fn union(&self, other: &Event) -> Event {
        debug_assert_eq!(self.len(), other.len());
        Event {
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(mine, theirs)| theirs.or(*mine))
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Convert to a world if every variable is assigned.
    pub fn into_world(self) -> Option<World> {
        self.values.into_iter().collect::<Option<Vec<_>>>().map(World)
    }
}

/// A complete assignment: one value index per network variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct World(Vec<usize>);

impl World {
    pub fn new(values: Vec<usize>) -> Self {
        World(values)
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    pub fn value(&self, var: VarIndex) -> usize {
        self.0[var]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this world agrees with every assignment in `event`.
    pub fn satisfies(&self, event: &Event) -> bool {
        event.assigned().all(|(var, value)| self.0[var] == value)
    }
}

/// Number of worlds consistent with `event`, or `None` on overflow.
pub fn world_count(network: &Network, event: &Event) -> Option<usize> {
    event
        .free_variables()
        .try_fold(1usize, |acc, var| acc.checked_mul(network.arity(var)))
}

/// All worlds consistent with `event`, in enumeration order.
pub fn generate_worlds(network: &Network, event: &Event) -> Vec<World> {
    let base: Vec<usize> = (0..event.len())
        .map(|var| event.get(var).unwrap_or(0))
        .collect();
    let mut current = vec![base];

    for var in event.free_variables() {
        let mut next = Vec::with_capacity(current.len() * network.arity(var));
        for value in 0..network.arity(var) {
            for world in &current {
                let mut extended = world.clone();
                extended[var] = value;
                next.push(extended);
            }
        }
        current = next;
    }

    current.into_iter().map(World).collect()
}

/// Lazy iterator over the worlds consistent with an event.
#[derive(Debug, Clone)]
pub struct Worlds<'n> {
    network: &'n Network,
    free: Vec<VarIndex>,
    current: Vec<usize>,
    remaining: Option<usize>,
    done: bool,
}

impl<'n> Worlds<'n> {
    pub fn new(network: &'n Network, event: &Event) -> Self {
        let free: Vec<VarIndex> = event.free_variables().collect();
        let current = (0..event.len())
            .map(|var| event.get(var).unwrap_or(0))
            .collect();
        let done = free.iter().any(|&var| network.arity(var) == 0);
        Self {
            network,
            remaining: if done { Some(0) } else { world_count(network, event) },
            free,
            current,
            done,
        }
    }

    /// Advance the odometer; false once every combination has been produced.
    fn advance(&mut self) -> bool {
        for &var in &self.free {
            self.current[var] += 1;
            if self.current[var] < self.network.arity(var) {
                return true;
            }
            self.current[var] = 0;
        }
        false
    }
}

impl Iterator for Worlds<'_> {
    type Item = World;

    fn next(&mut self) -> Option<World> {
        if self.done {
            return None;
        }
        let world = World(self.current.clone());
        if !self.advance() {
            self.done = true;
        }
        if let Some(r) = self.remaining.as_mut() {
            *r = r.saturating_sub(1);
        }
        Some(world)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(r) => (r, Some(r)),
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bn_common::Assignment;
    use bn_config::{JsonDocument, Structure, Values};
    use std::collections::HashSet;

    fn three_var() -> Network {
        let s = Structure::parse_json(
            r#"{"variables": {"A": ["t", "f"], "B": ["x", "y", "z"], "C": ["t", "f"]}}"#,
        )
        .unwrap();
        let v = Values::parse_json(
            r#"{"prior_probabilities": {
                "A": {"t": 0.5, "f": 0.5},
                "B": {"x": 0.2, "y": 0.3, "z": 0.5},
                "C": {"t": 0.9, "f": 0.1}
            }}"#,
        )
        .unwrap();
        Network::construct(&s, &v).unwrap()
    }

    #[test]
    fn count_is_product_of_free_domains() {
        let net = three_var();
        let empty = Event::empty(net.len());
        assert_eq!(generate_worlds(&net, &empty).len(), 12);
        assert_eq!(world_count(&net, &empty), Some(12));

        let partial = net.resolve(&Assignment::new().with("B", "y")).unwrap();
        let worlds = generate_worlds(&net, &partial);
        assert_eq!(worlds.len(), 4);
        assert!(worlds.iter().all(|w| w.value(1) == 1));
    }

    #[test]
    fn worlds_are_distinct_and_consistent() {
        let net = three_var();
        let partial = net.resolve(&Assignment::new().with("C", "f")).unwrap();
        let worlds = generate_worlds(&net, &partial);
        let unique: HashSet<_> = worlds.iter().collect();
        assert_eq!(unique.len(), worlds.len());
        assert!(worlds.iter().all(|w| w.satisfies(&partial)));
    }

    #[test]
    fn complete_event_yields_itself() {
        let net = three_var();
        let event = net
            .resolve(&Assignment::new().with("A", "f").with("B", "z").with("C", "t"))
            .unwrap();
        let worlds = generate_worlds(&net, &event);
        assert_eq!(worlds, vec![World::new(vec![1, 2, 0])]);
        assert_eq!(Worlds::new(&net, &event).count(), 1);
    }

    #[test]
    fn first_free_variable_varies_fastest() {
        let net = three_var();
        let partial = net.resolve(&Assignment::new().with("B", "x")).unwrap();
        let worlds: Vec<Vec<usize>> = generate_worlds(&net, &partial)
            .into_iter()
            .map(|w| w.values().to_vec())
            .collect();
        assert_eq!(
            worlds,
            vec![vec![0, 0, 0], vec![1, 0, 0], vec![0, 0, 1], vec![1, 0, 1]]
        );
    }

    #[test]
    fn lazy_matches_eager_order() {
        let net = three_var();
        for assignment in [
            Assignment::new(),
            Assignment::new().with("A", "t"),
            Assignment::new().with("B", "z").with("C", "f"),
        ] {
            let event = net.resolve(&assignment).unwrap();
            let lazy: Vec<World> = Worlds::new(&net, &event).collect();
            assert_eq!(lazy, generate_worlds(&net, &event));
        }
    }

    #[test]
    fn size_hint_is_exact() {
        let net = three_var();
        let mut worlds = Worlds::new(&net, &Event::empty(net.len()));
        assert_eq!(worlds.size_hint(), (12, Some(12)));
        worlds.next();
        assert_eq!(worlds.size_hint(), (11, Some(11)));
    }

    #[test]
    fn union_prefers_second() {
        let mut a = Event::empty(3);
        a.set(0, 1);
        a.set(1, 0);
        let mut b = Event::empty(3);
        b.set(1, 2);
        let merged = a.union(&b);
        assert_eq!(merged.get(0), Some(1));
        assert_eq!(merged.get(1), Some(2));
        assert_eq!(merged.get(2), None);
        assert!(!merged.is_complete());
    }

    #[test]
    fn into_world_requires_completeness() {
        let mut e = Event::empty(2);
        e.set(0, 1);
        assert!(e.clone().into_world().is_none());
        e.set(1, 0);
        assert_eq!(e.into_world(), Some(World::new(vec![1, 0])));
    }

    #[test]
    fn empty_network_has_one_empty_world() {
        let s = Structure::parse_json(r#"{"variables": {}}"#).unwrap();
        let net = Network::construct(&s, &Values::default()).unwrap();
        let worlds = generate_worlds(&net, &Event::empty(0));
        assert_eq!(worlds, vec![World::new(vec![])]);
        assert_eq!(Worlds::new(&net, &Event::empty(0)).count(), 1);
    }
}
