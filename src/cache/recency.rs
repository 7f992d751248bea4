//! Recency List Module
//!
//! Doubly-linked list of cache nodes kept in an index arena.
//!
//! Nodes live in a `Vec<Option<Node>>` and link to each other by slot index,
//! so handles stay valid while other nodes come and go. Freed slots are
//! recycled through a free list.
//!
//! ```text
//!   head ─► [3] ◄──► [0] ◄──► [5] ◄── tail
//!           MRU                LRU
//! ```

// == Node Handle ==
/// Stable handle to a node inside a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Returns the arena slot this handle points at.
    #[cfg(test)]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Orders entries from most recently used (head) to least recently used (tail).
#[derive(Debug)]
pub struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts a new node at the head and returns its handle.
    pub fn push_front(&mut self, key: K, value: V) -> NodeRef {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        NodeRef(idx)
    }

    // == Remove ==
    /// Unlinks a node, frees its slot and returns its contents.
    ///
    /// Returns `None` if the handle does not point at a live node.
    pub fn remove(&mut self, node: NodeRef) -> Option<(K, V)> {
        if !self.contains(node) {
            return None;
        }
        self.unlink(node.0);
        let removed = self.nodes[node.0].take()?;
        self.free.push(node.0);
        self.len -= 1;
        Some((removed.key, removed.value))
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, node: NodeRef) {
        if self.head == Some(node.0) || !self.contains(node) {
            return;
        }
        self.unlink(node.0);
        self.link_front(node.0);
    }

    // == Remove Last ==
    /// Removes and returns the least recently used node, if any.
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(NodeRef(tail))
    }

    // == Accessors ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `node` points at a live node of this list.
    pub fn contains(&self, node: NodeRef) -> bool {
        matches!(self.nodes.get(node.0), Some(Some(_)))
    }

    /// Handle of the most recently used node.
    pub fn head(&self) -> Option<NodeRef> {
        self.head.map(NodeRef)
    }

    /// Handle of the least recently used node.
    pub fn tail(&self) -> Option<NodeRef> {
        self.tail.map(NodeRef)
    }

    pub fn key(&self, node: NodeRef) -> Option<&K> {
        self.node(node.0).map(|n| &n.key)
    }

    pub fn value(&self, node: NodeRef) -> Option<&V> {
        self.node(node.0).map(|n| &n.value)
    }

    pub fn value_mut(&mut self, node: NodeRef) -> Option<&mut V> {
        self.nodes
            .get_mut(node.0)
            .and_then(|slot| slot.as_mut())
            .map(|n| &mut n.value)
    }

    /// Iterates entries from head (MRU) to tail (LRU).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    // == Clear ==
    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Link Helpers ==
    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.nodes.get(idx).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(idx).and_then(|slot| slot.as_mut())
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(head) = self.node_mut(h) {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Detaches a node from its neighbours and clears its links.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(prev_node) = self.node_mut(p) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(next_node) = self.node_mut(n) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Head-to-tail iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        Some((&node.key, &node.value))
    }
}
