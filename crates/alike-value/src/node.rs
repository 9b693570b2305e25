//! Shared, lockable value nodes.
//!
//! Structured values (lists, sets, maps, records) live behind a [`Node`]: an
//! `Arc<RwLock<T>>` whose allocation address doubles as the node's identity.
//! Two handles to the same node compare identical; two independently built
//! nodes never do, no matter how similar their contents are.
//!
//! Nodes are mutable after construction so that self-referential graphs can
//! be closed (`a.next = a`).

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ValueError, ValueResult};

/// Stable identity of a shared node for the lifetime of the node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw address backing this identity.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:#x})", self.0)
    }
}

/// A reference-counted, lock-protected value node.
pub struct Node<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Node<T> {
    /// Wrap a value in a fresh node with its own identity.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// The identity of this node.
    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.inner) as *const () as usize)
    }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Acquire shared read access.
    pub fn read(&self) -> ValueResult<RwLockReadGuard<'_, T>> {
        self.inner.read().map_err(|_| ValueError::Poisoned)
    }

    /// Acquire exclusive write access.
    pub fn write(&self) -> ValueResult<RwLockWriteGuard<'_, T>> {
        self.inner.write().map_err(|_| ValueError::Poisoned)
    }
}

impl<T: Clone> Node<T> {
    /// Clone the node's contents out of the lock.
    ///
    /// Comparators work on snapshots so no lock is held while they recurse.
    pub fn snapshot(&self) -> ValueResult<T> {
        Ok(self.read()?.clone())
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:?})", self.id())
    }
}
