//! Shared pool of growable assembly buffers.
//!
//! Encoding assembles each frame inside one pooled buffer so repeated sends
//! do not pay a fresh allocation per frame. Acquisition is scoped: a
//! [`PooledBuf`] hands the buffer back on drop, so release happens on every
//! exit path of the caller, error paths included.

use bytes::BytesMut;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Initial capacity of a freshly created pool buffer.
const INITIAL_CAPACITY: usize = 512;

/// Buffers retained by the pool; further releases drop the buffer instead.
const MAX_POOLED: usize = 16;

/// A bounded pool of reusable [`BytesMut`] buffers.
pub struct BufferPool {
    buffers: Mutex<Vec<BytesMut>>,
}

impl BufferPool {
    pub const fn new() -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
        }
    }

    /// Takes a cleared buffer out of the pool, allocating one if the pool is
    /// empty. The buffer returns to the pool when the guard drops.
    pub fn acquire(&self) -> PooledBuf<'_> {
        let buf = self
            .buffers
            .lock()
            .pop()
            .unwrap_or_else(|| BytesMut::with_capacity(INITIAL_CAPACITY));
        PooledBuf {
            buf: Some(buf),
            pool: self,
        }
    }

    fn release(&self, mut buf: BytesMut) {
        buf.clear();
        let mut buffers = self.buffers.lock();
        if buffers.len() < MAX_POOLED {
            buffers.push(buf);
        }
    }

    #[cfg(test)]
    fn pooled(&self) -> usize {
        self.buffers.lock().len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle to a pooled buffer; derefs to [`BytesMut`].
pub struct PooledBuf<'a> {
    buf: Option<BytesMut>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuf<'_> {
    type Target = BytesMut;

    fn deref(&self) -> &BytesMut {
        self.buf.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledBuf<'_> {
    fn deref_mut(&mut self) -> &mut BytesMut {
        self.buf.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuf<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}

/// The pool shared by the codec.
pub(crate) static SHARED: BufferPool = BufferPool::new();

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let pool = BufferPool::new();
        let buf = pool.acquire();
        assert_eq!(buf.len(), 0);
        assert!(buf.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn test_release_on_drop_and_reuse() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.acquire();
            buf.put_slice(b"some frame bytes");
        }
        assert_eq!(pool.pooled(), 1);

        // The recycled buffer comes back cleared.
        let buf = pool.acquire();
        assert_eq!(pool.pooled(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_release_on_early_exit() {
        let pool = BufferPool::new();
        let failing = |pool: &BufferPool| -> Result<(), ()> {
            let mut buf = pool.acquire();
            buf.put_u8(0xFF);
            Err(())
        };
        assert!(failing(&pool).is_err());
        assert_eq!(pool.pooled(), 1);
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = BufferPool::new();
        let guards: Vec<_> = (0..MAX_POOLED + 8).map(|_| pool.acquire()).collect();
        drop(guards);
        assert_eq!(pool.pooled(), MAX_POOLED);
    }
}
