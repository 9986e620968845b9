//! A bounded, lock-free pool of recently freed heap objects.
//!
//! Grounded on cairo's `freed_pool_t`: clip paths are allocated and
//! released constantly while a clip stack is pushed and popped, so
//! rather than going back to the allocator every time, the last few
//! released objects are stashed here and handed back out first. The
//! pool holds at most `N` objects; `get`/`put` use a single atomic
//! compare-exchange per slot instead of a lock, falling back to a linear
//! scan over the (tiny, fixed-size) slot array on contention.

use core::sync::atomic::{AtomicPtr, Ordering};

/// A freed-object pool with `N` slots, safe to share behind a `&`.
pub struct FreedPool<T, const N: usize> {
    slots: [AtomicPtr<T>; N],
}

impl<T, const N: usize> FreedPool<T, N> {
    pub const fn new() -> Self {
        FreedPool {
            slots: [const { AtomicPtr::new(core::ptr::null_mut()) }; N],
        }
    }

    /// Takes one object out of the pool, if any is stashed.
    pub fn get(&self) -> Option<alloc::boxed::Box<T>> {
        for slot in self.slots.iter() {
            let ptr = slot.swap(core::ptr::null_mut(), Ordering::Acquire);
            if !ptr.is_null() {
                return Some(unsafe { alloc::boxed::Box::from_raw(ptr) });
            }
        }
        None
    }

    /// Stashes `value` for reuse, or drops it if every slot is taken.
    pub fn put(&self, value: alloc::boxed::Box<T>) {
        let ptr = alloc::boxed::Box::into_raw(value);
        for slot in self.slots.iter() {
            if slot
                .compare_exchange(
                    core::ptr::null_mut(),
                    ptr,
                    Ordering::Release,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return;
            }
        }
        // Every slot taken: drop it for real.
        unsafe {
            drop(alloc::boxed::Box::from_raw(ptr));
        }
    }

    /// Drops every stashed object and empties the pool.
    pub fn reset(&self) {
        for slot in self.slots.iter() {
            let ptr = slot.swap(core::ptr::null_mut(), Ordering::AcqRel);
            if !ptr.is_null() {
                unsafe {
                    drop(alloc::boxed::Box::from_raw(ptr));
                }
            }
        }
    }
}

impl<T, const N: usize> Default for FreedPool<T, N> {
    fn default() -> Self {
        FreedPool::new()
    }
}

unsafe impl<T: Send, const N: usize> Sync for FreedPool<T, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_returns_the_same_value() {
        let pool: FreedPool<u64, 4> = FreedPool::new();
        pool.put(alloc::boxed::Box::new(42));
        let v = pool.get().unwrap();
        assert_eq!(*v, 42);
        assert!(pool.get().is_none());
    }

    #[test]
    fn pool_drops_objects_past_its_capacity() {
        let pool: FreedPool<u64, 2> = FreedPool::new();
        pool.put(alloc::boxed::Box::new(1));
        pool.put(alloc::boxed::Box::new(2));
        pool.put(alloc::boxed::Box::new(3));
        let mut count = 0;
        while pool.get().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn reset_empties_the_pool() {
        let pool: FreedPool<u64, 4> = FreedPool::new();
        pool.put(alloc::boxed::Box::new(1));
        pool.reset();
        assert!(pool.get().is_none());
    }
}
