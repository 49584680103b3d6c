//! A best-first search context in the spirit of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! extended with per-node bookkeeping, a closed set that is reported back to the caller and a
//! stable tie-break on discovery order.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Index used as the parent of the start node. Never dereferenced.
const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first. Equal estimates go to whichever node was discovered
        // first, which is its index in the parent map.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// What the search knows about a node it has discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bookkeeping<C> {
    pub parent: usize,
    pub moves_from_start: C,
    pub estimated_cost_to_finish: C,
    pub finalized: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    /// The goal was taken off the frontier. `path` runs from start to goal inclusive.
    Solved { path: Vec<N>, cost: C },
    /// The frontier emptied without reaching the goal.
    Exhausted,
    Cancelled,
}

/// Transient state for one search: frontier, parent map and closed set. [astar](Self::astar)
/// clears it before starting, so nothing carries over between searches.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    pub parents: FxIndexMap<N, Bookkeeping<C>>,
    closed: Vec<usize>,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            closed: Vec::new(),
        }
    }

    /// Pre-sizes the parent map, typically to the number of cells on the grid.
    pub fn with_capacity(capacity: usize) -> Self {
        SearchContext {
            to_see: BinaryHeap::with_capacity(capacity),
            parents: FxIndexMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            closed: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.to_see.clear();
        self.parents.clear();
        self.closed.clear();
    }

    pub fn bookkeeping(&self, node: &N) -> Option<&Bookkeeping<C>> {
        self.parents.get(node)
    }

    /// Finalised nodes in the order they were expanded.
    pub fn finalized(&self) -> impl Iterator<Item = &N> + '_ {
        self.closed
            .iter()
            .filter_map(|&ix| self.parents.get_index(ix).map(|(node, _)| node))
    }

    /// Walks the parent indices back from `goal` to the start and returns the chain in forward
    /// order.
    fn reverse_path(&self, goal: usize) -> Vec<N> {
        let mut path = Vec::new();
        let mut ix = goal;
        while let Some((node, entry)) = self.parents.get_index(ix) {
            path.push(node.clone());
            ix = entry.parent;
        }
        path.reverse();
        path
    }

    /// Runs A* from `start`. `successors` yields neighbours with their move cost, `heuristic`
    /// estimates the remaining cost and is evaluated once per node on discovery, `success`
    /// recognises the goal. `interrupted` is polled once per iteration.
    pub fn astar<FN, IN, FH, FS, FI>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        mut interrupted: FI,
    ) -> SearchOutcome<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
        FI: FnMut() -> bool,
    {
        self.clear();
        let start_h = heuristic(start);
        self.parents.insert(
            start.clone(),
            Bookkeeping {
                parent: NO_PARENT,
                moves_from_start: Zero::zero(),
                estimated_cost_to_finish: start_h,
                finalized: false,
            },
        );
        self.to_see.push(SmallestCostHolder {
            estimated_cost: start_h,
            cost: Zero::zero(),
            index: 0,
        });
        loop {
            if interrupted() {
                debug!("Search interrupted after {} expansions", self.closed.len());
                return SearchOutcome::Cancelled;
            }
            let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() else {
                break;
            };
            // A node is pushed again whenever a shorter route to it is found; the older entries
            // are stale and get dropped here.
            let node = match self.parents.get_index(index) {
                Some((node, entry)) if !entry.finalized && cost <= entry.moves_from_start => {
                    node.clone()
                }
                _ => continue,
            };
            if success(&node) {
                return SearchOutcome::Solved {
                    path: self.reverse_path(index),
                    cost,
                };
            }
            if let Some((_, entry)) = self.parents.get_index_mut(index) {
                entry.finalized = true;
            }
            self.closed.push(index);

            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        let h = heuristic(e.key());
                        let n = e.index();
                        e.insert(Bookkeeping {
                            parent: index,
                            moves_from_start: new_cost,
                            estimated_cost_to_finish: h,
                            finalized: false,
                        });
                        self.to_see.push(SmallestCostHolder {
                            estimated_cost: new_cost + h,
                            cost: new_cost,
                            index: n,
                        });
                    }
                    Occupied(mut e) => {
                        let n = e.index();
                        let entry = e.get_mut();
                        if entry.moves_from_start > new_cost {
                            entry.moves_from_start = new_cost;
                            entry.parent = index;
                            if !entry.finalized {
                                self.to_see.push(SmallestCostHolder {
                                    estimated_cost: new_cost + entry.estimated_cost_to_finish,
                                    cost: new_cost,
                                    index: n,
                                });
                            }
                        }
                    }
                }
            }
        }
        debug!(
            "Frontier exhausted after {} expansions without reaching the goal",
            self.closed.len()
        );
        SearchOutcome::Exhausted
    }
}
