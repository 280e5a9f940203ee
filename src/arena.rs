//! Vec-backed allocator that yields stable handles to its values.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to a value stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A simple allocator that stores a single type of object in a `Vec` and
/// hands out stable handles.
///
/// Freed blocks are kept on a free list and reused by later allocations, so a
/// handle is only valid until the value it refers to is freed. Accessing a
/// freed or out-of-range handle through `get` or `get_mut` yields `None`
/// rather than another value. All remaining objects are destroyed when the
/// arena is destroyed, without visiting any links the stored values may hold
/// between each other.
///
/// # Examples
///
/// ```
/// use rank_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(&x), 2);
/// assert_eq!(arena.get(&x), None);
/// ```
pub struct Arena<T> {
    head: Option<Handle>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of occupied blocks in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(1);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores a value in the arena and returns a handle to it, reusing a
    /// freed block when one is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle {
                    index: self.blocks.len() - 1,
                }
            }
            Some(handle) => {
                let vacant_block =
                    mem::replace(&mut self.blocks[handle.index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    }
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            }
        }
    }

    /// Removes the value a handle refers to and returns it. The block is
    /// pushed onto the free list.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if handle.index >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.blocks[handle.index],
            Block::Vacant(self.head.take()),
        );
        match old_block {
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(Handle {
                    index: handle.index,
                });
                value
            }
        }
    }

    /// Removes every value from the arena and resets the free list.
    pub fn clear(&mut self) {
        self.head = None;
        self.blocks.clear();
        self.len = 0;
    }

    /// Returns an immutable reference to the value a handle refers to, or
    /// `None` if the handle refers to a freed or out-of-range block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value a handle refers to, or `None`
    /// if the handle refers to a freed or out-of-range block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// *arena.get_mut(&x).unwrap() = 1;
    /// assert_eq!(arena[x], 1);
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to the values two distinct handles refer
    /// to, in argument order, or `None` if the handles are equal or either
    /// block is freed or out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// let y = arena.allocate(1);
    ///
    /// let (a, b) = arena.get2_mut(&x, &y).unwrap();
    /// std::mem::swap(a, b);
    ///
    /// assert_eq!(arena[x], 1);
    /// assert_eq!(arena[y], 0);
    /// ```
    pub fn get2_mut(&mut self, first: &Handle, second: &Handle) -> Option<(&mut T, &mut T)> {
        if first.index == second.index
            || first.index >= self.blocks.len()
            || second.index >= self.blocks.len()
        {
            return None;
        }
        let (low, high) = if first.index < second.index {
            (first.index, second.index)
        } else {
            (second.index, first.index)
        };
        let (head, tail) = self.blocks.split_at_mut(high);
        match (&mut head[low], &mut tail[0]) {
            (Block::Occupied(low_value), Block::Occupied(high_value)) => {
                if first.index < second.index {
                    Some((low_value, high_value))
                } else {
                    Some((high_value, low_value))
                }
            }
            _ => None,
        }
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
