use crate::storage::{self, FaultInjector};
use crate::{Error, Result, sort};
use core::cmp::Ordering;
use core::mem;
use slab::Slab;

pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) next: Option<usize>,
}

/// A singly-linked queue of strings.
///
/// Nodes live in an arena owned by the queue and are linked by their keys.
/// Every inserted string is copied, and removal hands the owned copy back to
/// the caller. Dropping the queue releases all of its nodes.
///
/// The queue has no internal synchronization.
#[derive(Default)]
pub struct Queue {
    nodes: Slab<Node>,
    head: Option<usize>,
    tail: Option<usize>,
    faults: Option<FaultInjector>,
}

impl Queue {
    pub const fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            tail: None,
            faults: None,
        }
    }

    /// Installs (or removes) a fault injector, returning the previous one.
    pub fn set_faults(&mut self, faults: Option<FaultInjector>) -> Option<FaultInjector> {
        mem::replace(&mut self.faults, faults)
    }

    pub fn faults(&self) -> Option<&FaultInjector> {
        self.faults.as_ref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&str> {
        self.head.map(|key| self.nodes[key].value.as_str())
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.map(|key| self.nodes[key].value.as_str())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Copies `s` into a new node at the head.
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let key = self.new_node(s, self.head)?;
        self.head = Some(key);
        if self.tail.is_none() {
            self.tail = Some(key);
        }
        Ok(())
    }

    /// Copies `s` into a new node at the tail.
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let key = self.new_node(s, None)?;
        match self.tail.replace(key) {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        Ok(())
    }

    fn new_node(&mut self, s: &str, next: Option<usize>) -> Result<usize> {
        let value = storage::copy_str(s, self.faults.as_mut())?;
        // The copy is dropped here if no slot can be taken.
        storage::claim_slot(self.faults.as_mut())?;
        Ok(self.nodes.insert(Node { value, next }))
    }

    /// Detaches the head node and returns its string.
    pub fn remove_head(&mut self) -> Result<String> {
        let key = self.head.ok_or(Error::EmptyQueue)?;
        let node = self.nodes.remove(key);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Ok(node.value)
    }

    /// Detaches the head node, copying its string into `buf` as a
    /// NUL-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes are copied, followed by a terminator;
    /// nothing is written to an empty buffer or when `buf` is `None`. The
    /// node is removed in every case. Returns the number of bytes copied,
    /// excluding the terminator.
    ///
    /// Truncation counts bytes, so it may split a multi-byte character.
    pub fn remove_head_into(&mut self, buf: Option<&mut [u8]>) -> Result<usize> {
        let value = self.remove_head()?;
        Ok(buf.map_or(0, |buf| copy_truncated(&value, buf)))
    }

    /// Reverses the order of the nodes in place.
    pub fn reverse(&mut self) {
        let Some(head) = self.head else {
            return;
        };
        let mut prev = None;
        let mut cur = Some(head);
        while let Some(key) = cur {
            cur = mem::replace(&mut self.nodes[key].next, prev);
            prev = Some(key);
        }
        self.head = prev;
        self.tail = Some(head);
        tracing::trace!("reversed queue, size={}", self.len());
    }

    /// Sorts the queue in ascending natural order, see [`natcmp::compare`].
    ///
    /// The sort is stable and only relinks existing nodes.
    pub fn sort(&mut self) {
        self.sort_by(natcmp::compare)
    }

    /// Sorts the queue with a custom comparator, keeping equal strings in
    /// their original order.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        if self.nodes.len() < 2 {
            return;
        }
        self.head = sort::merge_sort(&mut self.nodes, self.head, &mut cmp);
        self.tail = self.head.map(|head| sort::last(&self.nodes, head));
        tracing::trace!("sorted queue, size={}", self.len());
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.head.is_none(), self.nodes.is_empty());
        assert_eq!(self.tail.is_none(), self.nodes.is_empty());
        let mut count = 0;
        let mut last = None;
        let mut cur = self.head;
        while let Some(key) = cur {
            count += 1;
            assert!(count <= self.nodes.len(), "cycle in queue");
            last = Some(key);
            cur = self.nodes[key].next;
        }
        assert_eq!(count, self.nodes.len());
        assert_eq!(last, self.tail);
    }
}

fn copy_truncated(value: &str, buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return 0;
    };
    let len = value.len().min(room);
    buf[..len].copy_from_slice(&value.as_bytes()[..len]);
    buf[len] = 0;
    len
}

impl core::fmt::Debug for Queue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks a [`Queue`] from head to tail.
pub struct Iter<'a> {
    nodes: &'a Slab<Node>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.next?];
        self.next = node.next;
        self.remaining -= 1;
        Some(node.value.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
