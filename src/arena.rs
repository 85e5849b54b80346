// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Vec-backed arena for the vertices, half-edges and faces of a DCEL.
//
// Freed slots are tombstoned and never reused, so a handle names the same
// element for the whole life of the arena. Iteration visits live items in
// allocation order.

use core::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct Arena<T> {
    items: Vec<Option<T>>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            live: 0,
        }
    }

    /// Store `item`, returning its handle.
    pub fn alloc(&mut self, item: T) -> u32 {
        let idx = self.items.len() as u32;
        self.items.push(Some(item));
        self.live += 1;
        idx
    }

    /// Remove an item. Freeing an already-freed handle returns None.
    pub fn free(&mut self, idx: u32) -> Option<T> {
        let item = self.items.get_mut(idx as usize)?.take();
        if item.is_some() {
            self.live -= 1;
        }
        item
    }

    pub fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        self.items.get_mut(idx as usize)?.as_mut()
    }

    pub fn contains(&self, idx: u32) -> bool {
        self.get(idx).is_some()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Next handle `alloc` will return.
    pub fn next_handle(&self) -> u32 {
        self.items.len() as u32
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (i as u32, item)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> + '_ {
        self.items
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|item| (i as u32, item)))
    }

    pub fn handles(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|(i, _)| i)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;

    fn index(&self, idx: u32) -> &T {
        match self.get(idx) {
            Some(item) => item,
            None => panic!("stale arena handle {}", idx),
        }
    }
}

impl<T> IndexMut<u32> for Arena<T> {
    fn index_mut(&mut self, idx: u32) -> &mut T {
        match self.get_mut(idx) {
            Some(item) => item,
            None => panic!("stale arena handle {}", idx),
        }
    }
}
