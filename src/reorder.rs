use std::collections::VecDeque;
use log::debug;
use crate::error::{Error, Result};
use crate::sparsity::SparsityPattern;




/**
 * A bijection on `[0, n)` relabeling cell ids. The permutation is stored in
 * both directions: `order[new] = old` and `rank[old] = new`.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
    rank: Vec<usize>,
}




// ============================================================================
impl Permutation {


    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
            rank: (0..n).collect(),
        }
    }


    /**
     * Create a permutation from a list of old ids in their new order. Fails
     * unless every id in `[0, order.len())` appears exactly once.
     */
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut rank = vec![usize::MAX; n];

        for (new, &old) in order.iter().enumerate() {
            if old >= n || rank[old] != usize::MAX {
                return Err(Error::InvalidPermutation(n))
            }
            rank[old] = new;
        }
        Ok(Self { order, rank })
    }


    pub fn len(&self) -> usize {
        self.order.len()
    }


    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }


    /**
     * Return the old ids, listed in their new order.
     */
    pub fn order(&self) -> &[usize] {
        &self.order
    }


    /**
     * Return the new id of a cell given its old id.
     */
    pub fn new_id(&self, old: usize) -> usize {
        self.rank[old]
    }


    /**
     * Return the old id of a cell given its new id.
     */
    pub fn old_id(&self, new: usize) -> usize {
        self.order[new]
    }


    pub fn inverse(&self) -> Self {
        Self {
            order: self.rank.clone(),
            rank: self.order.clone(),
        }
    }
}




/**
 * Compute a reverse Cuthill-McKee ordering of a structurally symmetric
 * pattern. Each connected component is started from its unvisited vertex of
 * least degree (lowest id on ties), and the neighbors of each visited vertex
 * are queued by increasing degree, then id. The result depends only on the
 * pattern.
 *
 * Asymmetric patterns, like the one of a sample mesh where only residual
 * points own edges, are rejected.
 */
pub fn reverse_cuthill_mckee(pattern: &SparsityPattern) -> Result<Permutation> {
    if !pattern.is_symmetric() {
        return Err(Error::AsymmetricGraph)
    }

    let n = pattern.len();
    let degree: Vec<_> = (0..n).map(|r| pattern.degree(r)).collect();

    let mut starts: Vec<_> = (0..n).collect();
    starts.sort_by_key(|&v| (degree[v], v));

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();
    let mut components = 0;

    for start in starts {
        if visited[start] {
            continue
        }
        components += 1;
        visited[start] = true;
        queue.push_back(start);

        while let Some(v) = queue.pop_front() {
            order.push(v);

            let mut next: Vec<_> = pattern
                .row(v)
                .iter()
                .copied()
                .filter(|&u| !visited[u])
                .collect();
            next.sort_by_key(|&u| (degree[u], u));

            for u in next {
                visited[u] = true;
                queue.push_back(u);
            }
        }
    }
    debug!("cuthill-mckee visited {} vertices in {} components", n, components);

    order.reverse();
    Permutation::from_order(order)
}
