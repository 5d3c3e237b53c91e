//! Circular doubly-linked list with stable positions.

use std::ops::Index;

/// Position of an element in an [`EdgeRing`].
///
/// A position stays valid until its element is removed, whatever else is
/// inserted or removed in the meantime. Using a position after its element
/// was removed is a logic error and panics or yields an unrelated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingPos(usize);

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// A circular sequence backed by a slot vector.
///
/// Traversal wraps: the successor of the last element is the first. The ring
/// keeps a head so that forward iteration has a well-defined start, but no
/// operation treats the head specially otherwise.
#[derive(Debug, Clone)]
pub struct EdgeRing<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for EdgeRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EdgeRing<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of the first element in iteration order.
    #[inline]
    pub fn head(&self) -> Option<RingPos> {
        self.head.map(RingPos)
    }

    pub fn get(&self, pos: RingPos) -> Option<&T> {
        self.slots
            .get(pos.0)
            .and_then(Option::as_ref)
            .map(|node| &node.value)
    }

    /// Returns true if `pos` names a live element.
    pub fn contains(&self, pos: RingPos) -> bool {
        self.get(pos).is_some()
    }

    /// Circular successor of `pos`.
    #[inline]
    pub fn next(&self, pos: RingPos) -> RingPos {
        RingPos(self.node(pos.0).next)
    }

    /// Circular predecessor of `pos`.
    #[inline]
    pub fn prev(&self, pos: RingPos) -> RingPos {
        RingPos(self.node(pos.0).prev)
    }

    /// Appends `value` just before the head, i.e. at the end of iteration order.
    pub fn push_back(&mut self, value: T) -> RingPos {
        match self.head {
            Some(head) => self.insert_before(RingPos(head), value),
            None => {
                let slot = self.alloc(value);
                let node = self.node_mut(slot);
                node.prev = slot;
                node.next = slot;
                self.head = Some(slot);
                self.len = 1;
                RingPos(slot)
            }
        }
    }

    /// Inserts `value` immediately before `pos` and returns its position.
    pub fn insert_before(&mut self, pos: RingPos, value: T) -> RingPos {
        let next = pos.0;
        let prev = self.node(next).prev;
        let slot = self.alloc(value);
        {
            let node = self.node_mut(slot);
            node.prev = prev;
            node.next = next;
        }
        self.node_mut(prev).next = slot;
        self.node_mut(next).prev = slot;
        self.len += 1;
        RingPos(slot)
    }

    /// Inserts every value, in order, immediately before `pos`.
    ///
    /// Returns the position of the first inserted value, or `None` if the
    /// iterator was empty.
    pub fn splice_before<I>(&mut self, pos: RingPos, values: I) -> Option<RingPos>
    where
        I: IntoIterator<Item = T>,
    {
        let mut first = None;
        for value in values {
            let inserted = self.insert_before(pos, value);
            first.get_or_insert(inserted);
        }
        first
    }

    /// Unlinks the element at `pos` and returns it.
    pub fn remove(&mut self, pos: RingPos) -> T {
        let (prev, next) = {
            let node = self.node(pos.0);
            (node.prev, node.next)
        };

        if self.len == 1 {
            self.head = None;
        } else {
            self.node_mut(prev).next = next;
            self.node_mut(next).prev = prev;
            if self.head == Some(pos.0) {
                self.head = Some(next);
            }
        }

        self.len -= 1;
        self.free.push(pos.0);
        match self.slots[pos.0].take() {
            Some(node) => node.value,
            None => unreachable!("node() already checked the slot"),
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }

    /// Finds the first position, in iteration order, whose value matches.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<RingPos> {
        self.positions().find(|&pos| predicate(&self[pos]))
    }

    /// Iterates over positions starting at the head.
    pub fn positions(&self) -> Positions<'_, T> {
        Positions {
            ring: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Iterates over values starting at the head.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.positions().map(move |pos| &self[pos])
    }

    fn alloc(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: 0,
            next: 0,
        };
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Some(node) => node,
            None => panic!("stale ring position {slot}"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Some(node) => node,
            None => panic!("stale ring position {slot}"),
        }
    }
}

impl<T> Index<RingPos> for EdgeRing<T> {
    type Output = T;

    fn index(&self, pos: RingPos) -> &T {
        &self.node(pos.0).value
    }
}

impl<T> FromIterator<T> for EdgeRing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Self::new();
        for value in iter {
            ring.push_back(value);
        }
        ring
    }
}

/// Iterator over the positions of an [`EdgeRing`], one lap from the head.
pub struct Positions<'a, T> {
    ring: &'a EdgeRing<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for Positions<'_, T> {
    type Item = RingPos;

    fn next(&mut self) -> Option<RingPos> {
        if self.remaining == 0 {
            return None;
        }
        let pos = RingPos(self.current?);
        self.remaining -= 1;
        self.current = Some(self.ring.node(pos.0).next);
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
