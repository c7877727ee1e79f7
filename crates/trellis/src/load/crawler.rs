use crate::join::ResolvedHop;

/// Tracks which fetch-join branch the tree transformer is inside while it
/// walks one result row.
///
/// Fetch chains are merged into a prefix tree, so structurally identical
/// chains (same hops, same aliases) collapse into one branch. The tree is
/// flattened pre-order (node, then each child subtree in request order) and a
/// depth cursor walks that flattened list: `branches` returns the children of
/// the node under the cursor, `forward` advances the cursor one node, and
/// `rewind` resets it for the next row.
pub struct Crawler {
    nodes: Vec<Node>,
    /// Pre-order visit sequence over `nodes`.
    order: Vec<usize>,
    depth: usize,
}

struct Node {
    /// `None` only for the root, which stands for the base table itself.
    hop: Option<ResolvedHop>,
    children: Vec<usize>,
}

impl Crawler {
    pub fn new(chains: &[Vec<ResolvedHop>]) -> Crawler {
        let mut nodes = vec![Node {
            hop: None,
            children: Vec::new(),
        }];

        for chain in chains {
            let mut at = 0;
            for hop in chain {
                let found = nodes[at]
                    .children
                    .iter()
                    .copied()
                    .find(|&child| nodes[child].hop.as_ref() == Some(hop));
                at = match found {
                    Some(child) => child,
                    None => {
                        let child = nodes.len();
                        nodes.push(Node {
                            hop: Some(hop.clone()),
                            children: Vec::new(),
                        });
                        nodes[at].children.push(child);
                        child
                    }
                };
            }
        }

        let mut order = Vec::with_capacity(nodes.len());
        flatten(&nodes, 0, &mut order);

        Crawler {
            nodes,
            order,
            depth: 0,
        }
    }

    /// No fetch chains were requested at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Branch hops under the node the cursor is on.
    pub fn branches(&self) -> Vec<ResolvedHop> {
        let Some(&at) = self.order.get(self.depth) else {
            return Vec::new();
        };
        self.nodes[at]
            .children
            .iter()
            .filter_map(|&child| self.nodes[child].hop.clone())
            .collect()
    }

    pub fn forward(&mut self) {
        self.depth += 1;
    }

    pub fn rewind(&mut self) {
        self.depth = 0;
    }
}

fn flatten(nodes: &[Node], at: usize, order: &mut Vec<usize>) {
    order.push(at);
    for &child in &nodes[at].children {
        flatten(nodes, child, order);
    }
}
