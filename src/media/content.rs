//! Revocable content handles for uploaded bytes.
//!
//! Only [`ContentStore`] creates handles and only the registry revokes them.
//! Handles are reference counted, so a clip or preview holding a clone sees
//! the revocation instead of reading freed content.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::error::{EditorError, Result};

#[derive(Debug)]
struct HandleInner {
    url: String,
    len: u64,
    bytes: RwLock<Option<Arc<[u8]>>>,
    pool: Arc<AtomicU64>,
}

/// Shared, revocable reference to uploaded bytes
#[derive(Debug, Clone)]
pub struct ContentHandle {
    inner: Arc<HandleInner>,
}

impl ContentHandle {
    /// Opaque URL-like reference, unique per handle
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Size of the content in bytes
    pub fn len(&self) -> u64 {
        self.inner.len
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    pub fn is_revoked(&self) -> bool {
        self.inner
            .bytes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Read the content. Fails once the handle has been revoked.
    pub fn bytes(&self) -> Result<Arc<[u8]>> {
        self.inner
            .bytes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| EditorError::ContentRevoked(self.inner.url.clone()))
    }

    /// Release the content and return its bytes to the pool.
    ///
    /// Returns `false` if the handle was already revoked.
    pub(crate) fn revoke(&self) -> bool {
        let released = self
            .inner
            .bytes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match released {
            Some(_) => {
                self.inner.pool.fetch_sub(self.inner.len, Ordering::AcqRel);
                log::debug!("Revoked content handle {}", self.inner.url);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for ContentHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Allocator for content handles with a bounded byte pool
#[derive(Debug, Clone)]
pub struct ContentStore {
    capacity: u64,
    live: Arc<AtomicU64>,
}

impl ContentStore {
    /// Create a store that holds at most `capacity` bytes at once
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            live: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Bytes currently held by live handles
    pub fn live_bytes(&self) -> u64 {
        self.live.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Allocate a handle for `bytes`.
    ///
    /// The copy into shared storage runs on the blocking pool; the returned
    /// future resolves once the handle is ready or allocation has failed.
    /// A failed or cancelled allocation leaves the pool unchanged.
    pub async fn allocate(&self, bytes: Vec<u8>) -> Result<ContentHandle> {
        let len = bytes.len() as u64;
        let reservation = self.reserve(len)?;

        let stored = tokio::task::spawn_blocking(move || Arc::<[u8]>::from(bytes))
            .await
            .map_err(|e| EditorError::Ingestion(e.to_string()))?;

        let url = format!("blob:cutroom/{}", uuid::Uuid::new_v4());
        log::debug!("Allocated content handle {} ({} bytes)", url, len);

        Ok(ContentHandle {
            inner: Arc::new(HandleInner {
                url,
                len,
                bytes: RwLock::new(Some(stored)),
                pool: reservation.commit(),
            }),
        })
    }

    fn reserve(&self, len: u64) -> Result<Reservation> {
        let capacity = self.capacity;
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                live.checked_add(len).filter(|total| *total <= capacity)
            })
            .map(|_| Reservation {
                pool: Arc::clone(&self.live),
                len,
                committed: false,
            })
            .map_err(|live| {
                EditorError::Ingestion(format!(
                    "content pool exhausted ({} of {} bytes in use, {} requested)",
                    live, capacity, len
                ))
            })
    }
}

/// Pool bytes held for an allocation in flight.
///
/// Dropping it before [`Reservation::commit`] gives the bytes back.
struct Reservation {
    pool: Arc<AtomicU64>,
    len: u64,
    committed: bool,
}

impl Reservation {
    /// Hand the bytes over to a handle, which releases them on revoke
    fn commit(mut self) -> Arc<AtomicU64> {
        self.committed = true;
        Arc::clone(&self.pool)
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if !self.committed {
            self.pool.fetch_sub(self.len, Ordering::AcqRel);
            log::debug!("Released {} reserved bytes", self.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::task::Poll;

    #[tokio::test]
    async fn test_allocate_and_read() {
        let store = ContentStore::new(1024);
        let handle = store.allocate(vec![1, 2, 3]).await.unwrap();

        assert_eq!(handle.len(), 3);
        assert!(handle.url().starts_with("blob:cutroom/"));
        assert_eq!(&*handle.bytes().unwrap(), &[1, 2, 3]);
        assert_eq!(store.live_bytes(), 3);
    }

    #[tokio::test]
    async fn test_revoke_is_visible_through_clones() {
        let store = ContentStore::new(1024);
        let handle = store.allocate(vec![0; 10]).await.unwrap();
        let held_by_clip = handle.clone();

        assert!(handle.revoke());
        assert!(held_by_clip.is_revoked());
        assert!(matches!(
            held_by_clip.bytes(),
            Err(EditorError::ContentRevoked(_))
        ));
        assert_eq!(store.live_bytes(), 0);

        // Second revoke is a no-op and does not underflow the pool
        assert!(!held_by_clip.revoke());
        assert_eq!(store.live_bytes(), 0);
    }

    #[tokio::test]
    async fn test_pool_exhaustion() {
        let store = ContentStore::new(8);
        let first = store.allocate(vec![0; 6]).await.unwrap();

        let result = store.allocate(vec![0; 6]).await;
        assert!(matches!(result, Err(EditorError::Ingestion(_))));
        assert_eq!(store.live_bytes(), 6);

        first.revoke();
        assert!(store.allocate(vec![0; 6]).await.is_ok());
    }

    #[tokio::test]
    async fn test_handles_are_distinct() {
        let store = ContentStore::new(1024);
        let a = store.allocate(vec![1]).await.unwrap();
        let b = store.allocate(vec![1]).await.unwrap();
        assert_ne!(a, b);
        assert_ne!(a.url(), b.url());
        assert_eq!(a, a.clone());
    }

    #[tokio::test]
    async fn test_cancelled_allocation_releases_pool() {
        let store = ContentStore::new(1000);

        {
            let mut pending = std::pin::pin!(store.allocate(vec![0; 800]));
            std::future::poll_fn(|cx| {
                let _ = pending.as_mut().poll(cx);
                Poll::Ready(())
            })
            .await;
        }

        assert_eq!(store.live_bytes(), 0);
        let handle = store.allocate(vec![0; 800]).await.unwrap();
        assert_eq!(store.live_bytes(), 800);
        assert!(handle.revoke());
        assert_eq!(store.live_bytes(), 0);
    }
}
