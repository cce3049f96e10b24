//! Recency List Module
//!
//! Index-based doubly linked list that orders keys by recency for LRU eviction.

// == Node Id ==
/// Stable handle to a node in a [`RecencyList`].
///
/// Handles stay valid until the node is removed; a slot may be reused by a
/// later `push_back`, so callers must drop handles of removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
///
/// Nodes live in a slot vector linked by index:
/// - Front (head) = Least recently used
/// - Back (tail) = Most recently used
///
/// Touching, appending, unlinking and popping the front are all O(1).
#[derive(Debug)]
pub struct RecencyList<K> {
    /// Node slots, `None` when free
    nodes: Vec<Option<Node<K>>>,
    /// Indices of free slots available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty recency list.
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

    // == Push Back ==
    /// Appends a key as the most recently used and returns its handle.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
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
        self.link_back(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a node as most recently used (moves it to the back).
    ///
    /// Returns false if the handle does not refer to a live node.
    pub fn touch(&mut self, id: NodeId) -> bool {
        if self.slot(id.0).is_none() {
            return false;
        }
        if self.tail != Some(id.0) {
            self.unlink(id.0);
            self.link_back(id.0);
        }
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its key.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.slot(id.0)?;
        self.unlink(id.0);
        let node = self.nodes[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Front ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        let head = self.head?;
        self.remove(NodeId(head))
    }

    // == Front ==
    /// Returns the least recently used key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|idx| self.slot(idx)).map(|node| &node.key)
    }

    /// Returns the most recently used key.
    pub fn back(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.slot(idx)).map(|node| &node.key)
    }

    /// Returns the key behind a handle.
    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.slot(id.0).map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    fn slot(&self, idx: usize) -> Option<&Node<K>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slot_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.slot_mut(tail) {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slot(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(node) = self.slot_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slot_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        if let Some(node) = self.slot_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.list.slot(idx)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
