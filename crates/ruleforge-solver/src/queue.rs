//! Frontier of prefixes waiting to be expanded.
//!
//! A binary heap ordered by the configured [`QueuePolicy`]. The heap holds
//! node ids and a priority key fixed at push time. Entries for nodes that
//! were superseded or outgrown by the best objective are left in place and
//! skipped by the driver when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ruleforge_config::QueuePolicy;

use crate::arena::{Node, NodeId};

/// Wrapper for nodes in the priority queue.
#[derive(Debug, Clone, Copy)]
struct PriorityNode {
    node: NodeId,
    key: f64,
    seq: u64,
    policy: QueuePolicy,
}

impl Eq for PriorityNode {}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.policy {
            QueuePolicy::Dfs => {
                // Deeper first, then most recently pushed
                self.key
                    .total_cmp(&other.key)
                    .then(self.seq.cmp(&other.seq))
            }
            QueuePolicy::Bfs
            | QueuePolicy::Curious
            | QueuePolicy::LowerBound
            | QueuePolicy::Objective => {
                // Smaller key first, then first pushed (reversed)
                other
                    .key
                    .total_cmp(&self.key)
                    .then(other.seq.cmp(&self.seq))
            }
        }
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of node ids.
#[derive(Debug)]
pub struct FrontierQueue {
    policy: QueuePolicy,
    regularization: f64,
    nsamples: usize,
    heap: BinaryHeap<PriorityNode>,
    next_seq: u64,
}

impl FrontierQueue {
    /// Creates an empty queue. `regularization` and `nsamples` feed the
    /// curiosity key.
    pub fn new(policy: QueuePolicy, regularization: f64, nsamples: usize) -> Self {
        Self {
            policy,
            regularization,
            nsamples,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    fn key(&self, node: &Node) -> f64 {
        match self.policy {
            QueuePolicy::Bfs | QueuePolicy::Dfs => node.depth() as f64,
            QueuePolicy::Curious => node.curiosity(self.regularization, self.nsamples),
            QueuePolicy::LowerBound => node.lower_bound(),
            QueuePolicy::Objective => node.objective(),
        }
    }

    /// Adds `id`, whose data is `node`.
    pub fn push(&mut self, id: NodeId, node: &Node) {
        let entry = PriorityNode {
            node: id,
            key: self.key(node),
            seq: self.next_seq,
            policy: self.policy,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    /// Removes and returns the highest-priority node id.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
