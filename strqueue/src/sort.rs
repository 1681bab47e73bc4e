//! Merge sort over key-linked chains of [`Node`]s.
//!
//! A chain is identified by the key of its first node and ends at the node
//! whose `next` is `None`. Sorting only rewrites `next` links.

use crate::queue::Node;
use core::cmp::Ordering;
use slab::Slab;

/// Sorts the chain starting at `head`, returning the new first key.
pub(crate) fn merge_sort<F>(
    nodes: &mut Slab<Node>,
    head: Option<usize>,
    cmp: &mut F,
) -> Option<usize>
where
    F: FnMut(&str, &str) -> Ordering,
{
    let head = head?;
    let Some(second) = split(nodes, head) else {
        return Some(head);
    };
    let left = merge_sort(nodes, Some(head), cmp);
    let right = merge_sort(nodes, Some(second), cmp);
    merge(nodes, left, right, cmp)
}

/// Cuts the chain after its middle node and returns the first key of the
/// second half, or `None` for a single-node chain.
fn split(nodes: &mut Slab<Node>, head: usize) -> Option<usize> {
    let mut slow = head;
    let mut fast = nodes[head].next;
    while let Some(next) = fast.and_then(|key| nodes[key].next) {
        let Some(step) = nodes[slow].next else {
            break;
        };
        slow = step;
        fast = nodes[next].next;
    }
    nodes[slow].next.take()
}

/// Merges two sorted chains. On ties the node from `left` goes first.
fn merge<F>(
    nodes: &mut Slab<Node>,
    mut left: Option<usize>,
    mut right: Option<usize>,
    cmp: &mut F,
) -> Option<usize>
where
    F: FnMut(&str, &str) -> Ordering,
{
    let mut head = None;
    let mut last = None;
    loop {
        let key = match (left, right) {
            (Some(l), Some(r)) => {
                if cmp(nodes[l].value.as_str(), nodes[r].value.as_str()).is_le() {
                    left = nodes[l].next;
                    l
                } else {
                    right = nodes[r].next;
                    r
                }
            },
            (rest, None) | (None, rest) => {
                link(nodes, &mut head, last, rest);
                return head;
            },
        };
        link(nodes, &mut head, last, Some(key));
        last = Some(key);
    }
}

fn link(
    nodes: &mut Slab<Node>,
    head: &mut Option<usize>,
    last: Option<usize>,
    key: Option<usize>,
) {
    match last {
        Some(last) => nodes[last].next = key,
        None => *head = key,
    }
}

/// Returns the key of the final node of the chain starting at `key`.
pub(crate) fn last(nodes: &Slab<Node>, mut key: usize) -> usize {
    while let Some(next) = nodes[key].next {
        key = next;
    }
    key
}
