//! Queue operations on a queue that may not exist.
//!
//! Callers that keep their queue in an `Option` (created on demand, freed
//! explicitly) use these instead of the [`Queue`] methods. An absent queue
//! has size zero, ignores reordering, and rejects everything else with
//! [`Error::NoQueue`].

use crate::{Error, Queue, Result};

pub fn create() -> Option<Queue> {
    Some(Queue::new())
}

/// Releases the queue and every string it owns. Absent queues are ignored.
pub fn destroy(q: Option<Queue>) {
    if let Some(q) = q {
        tracing::trace!("destroying queue, size={}", q.len());
    }
}

pub fn insert_head(q: Option<&mut Queue>, s: &str) -> Result<()> {
    q.ok_or(Error::NoQueue)?.insert_head(s)
}

pub fn insert_tail(q: Option<&mut Queue>, s: &str) -> Result<()> {
    q.ok_or(Error::NoQueue)?.insert_tail(s)
}

/// See [`Queue::remove_head_into`].
pub fn remove_head(q: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Result<usize> {
    q.ok_or(Error::NoQueue)?.remove_head_into(buf)
}

pub fn size(q: Option<&Queue>) -> usize {
    q.map_or(0, Queue::len)
}

pub fn reverse(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.reverse();
    }
}

pub fn sort(q: Option<&mut Queue>) {
    if let Some(q) = q {
        q.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_queue() {
        let mut q: Option<Queue> = None;
        assert_eq!(insert_head(q.as_mut(), "a"), Err(Error::NoQueue));
        assert_eq!(insert_tail(q.as_mut(), "a"), Err(Error::NoQueue));
        let mut buf = [0u8; 4];
        assert_eq!(remove_head(q.as_mut(), Some(&mut buf[..])), Err(Error::NoQueue));
        assert_eq!(buf, [0; 4]);
        assert_eq!(size(q.as_ref()), 0);
        reverse(q.as_mut());
        sort(q.as_mut());
        destroy(q.take());
        destroy(None);
    }

    #[test]
    fn present_queue() {
        let mut q = create();
        insert_tail(q.as_mut(), "img10").unwrap();
        insert_tail(q.as_mut(), "img2").unwrap();
        insert_head(q.as_mut(), "img1").unwrap();
        assert_eq!(size(q.as_ref()), 3);

        sort(q.as_mut());
        reverse(q.as_mut());
        let mut buf = [0u8; 4];
        assert_eq!(remove_head(q.as_mut(), Some(&mut buf[..])), Ok(3));
        assert_eq!(&buf, b"img\0");
        assert_eq!(remove_head(q.as_mut(), None), Ok(0));
        assert_eq!(remove_head(q.as_mut(), Some(&mut buf[..])), Ok(3));
        assert_eq!(remove_head(q.as_mut(), None), Err(Error::EmptyQueue));
        assert_eq!(size(q.as_ref()), 0);
        destroy(q);
    }
}
