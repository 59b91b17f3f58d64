////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Buffers handed to native calls by address.
//!
//! Overloads that take a buffer instead of a raw pointer pin it, pass its address to the single
//! bound entry point and unpin it afterwards. The pin is a guard, so it is released on every exit
//! path, unwinding included.

use std::{
    ffi::c_void,
    marker::PhantomData,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Counts the buffers currently pinned, so leaked pins are observable.
#[derive(Debug, Default)]
pub struct PinTracker {
    outstanding: AtomicUsize,
}

impl PinTracker {
    pub fn new() -> PinTracker {
        PinTracker::default()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Pins a buffer the native side may write to.
    pub fn pin<'a, T>(&'a self, buffer: &'a mut [T]) -> PinnedBuffer<'a, T> {
        self.track(buffer.as_mut_ptr(), buffer.len())
    }

    /// Pins a buffer the native side only reads.
    pub fn pin_shared<'a, T>(&'a self, buffer: &'a [T]) -> PinnedBuffer<'a, T> {
        self.track(buffer.as_ptr() as *mut T, buffer.len())
    }

    fn track<'a, T>(&'a self, ptr: *mut T, len: usize) -> PinnedBuffer<'a, T> {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        PinnedBuffer { ptr, len, tracker: self, _borrow: PhantomData }
    }

    /// Runs `call` with the address and length of `buffer`, which stays pinned until it returns
    /// or unwinds.
    pub fn with_pinned<T, R, F>(&self, buffer: &mut [T], call: F) -> R
    where F: FnOnce(*mut c_void, usize) -> R {
        let pinned = self.pin(buffer);
        call(pinned.as_void_ptr(), pinned.len())
    }
}

/// A pinned buffer; unpinned on drop.
#[derive(Debug)]
pub struct PinnedBuffer<'a, T> {
    ptr: *mut T,
    len: usize,
    tracker: &'a PinTracker,
    _borrow: PhantomData<&'a mut [T]>,
}

impl<'a, T> PinnedBuffer<'a, T> {
    pub fn as_void_ptr(&self) -> *mut c_void {
        self.ptr as *mut c_void
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a, T> Drop for PinnedBuffer<'a, T> {
    fn drop(&mut self) {
        self.tracker.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;

    #[test]
    fn pins_are_released_after_the_call() {
        let tracker = PinTracker::new();
        let mut data = [1.0f32, 2.0, 3.0];

        let len = tracker.with_pinned(&mut data, |ptr, len| {
            assert_eq!(tracker.outstanding(), 1);
            unsafe { *(ptr as *mut f32).add(2) = 9.0 };
            len
        });

        assert_eq!(len, 3);
        assert_eq!(data[2], 9.0);
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn pins_are_released_when_the_call_panics() {
        let tracker = PinTracker::new();
        let mut data = vec![0u8; 16];

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            tracker.with_pinned::<u8, (), _>(&mut data, |_, _| panic!("native call failed"))
        }));

        assert!(result.is_err());
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn several_pins_release_independently() {
        let tracker = PinTracker::new();
        let row = [0u8; 4];
        let mut column = [0u8; 4];

        let a = tracker.pin_shared(&row);
        {
            let b = tracker.pin(&mut column);
            assert_eq!(tracker.outstanding(), 2);
            assert_eq!(b.len(), 4);
        }
        assert_eq!(tracker.outstanding(), 1);
        drop(a);
        assert_eq!(tracker.outstanding(), 0);
    }
}
