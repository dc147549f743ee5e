//! Node type for the persistent ordered map (component A).
//!
//! Grounded on `llrb::node::Node`, stripped of the CAS/seqno/`Entry`
//! wrapper the teacher's storage engine needs for multi-version retention:
//! this map stores one `(key, value)` pair per node and nothing else.

use std::sync::Arc;

#[derive(Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub black: bool, // false == red
    pub left: Option<Arc<Node<K, V>>>,
    pub right: Option<Arc<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            black: false, // new nodes are red
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn as_left_ref(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn as_right_ref(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub fn toggle_link(&mut self) {
        self.black = !self.black
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
