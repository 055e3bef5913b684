use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::envelope::TypedEnvelope;

/// A shared queue of transaction envelopes awaiting preparation or signing.
///
/// A single mutex guards the deque; every operation takes the lock once and
/// no iterator escapes it, so concurrent producers and consumers observe the
/// queue atomically. Nonce selection for signing is linearized through
/// [`find_by_type_and_nonce`].
///
/// [`find_by_type_and_nonce`]: EnvelopePool::find_by_type_and_nonce
#[derive(Debug, Default)]
pub struct EnvelopePool {
    envelopes: Mutex<VecDeque<TypedEnvelope>>,
}

impl EnvelopePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an envelope to the back of the queue.
    pub fn enqueue(&self, envelope: TypedEnvelope) {
        self.lock().push_back(envelope);
    }

    /// Removes and returns the oldest envelope.
    pub fn pop_first(&self) -> Option<TypedEnvelope> {
        self.lock().pop_front()
    }

    /// Removes and returns the newest envelope.
    pub fn pop_last(&self) -> Option<TypedEnvelope> {
        self.lock().pop_back()
    }

    /// Returns a copy of the first envelope matching `(tx_type, nonce)`,
    /// leaving it queued. `pop_first`/`pop_last` are the consuming
    /// operations.
    pub fn find_by_type_and_nonce(&self, tx_type: u8, nonce: u64) -> Option<TypedEnvelope> {
        self.lock()
            .iter()
            .find(|e| e.tx_type() == tx_type && e.nonce() == nonce)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The queue holds plain data, so a poisoned lock is still consistent;
    /// recover the guard instead of propagating the panic.
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<TypedEnvelope>> {
        self.envelopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Eip1559Envelope, LegacyEnvelope};
    use std::sync::Arc;

    fn eip1559(nonce: u64) -> TypedEnvelope {
        TypedEnvelope::Eip1559(Eip1559Envelope {
            chain_id: 1,
            nonce,
            ..Default::default()
        })
    }

    fn legacy(nonce: u64) -> TypedEnvelope {
        TypedEnvelope::Legacy(LegacyEnvelope {
            nonce,
            ..Default::default()
        })
    }

    #[test]
    fn fifo_and_lifo_removal() {
        let pool = EnvelopePool::new();
        pool.enqueue(eip1559(0));
        pool.enqueue(eip1559(1));
        pool.enqueue(eip1559(2));

        assert_eq!(pool.pop_first().unwrap().nonce(), 0);
        assert_eq!(pool.pop_last().unwrap().nonce(), 2);
        assert_eq!(pool.pop_first().unwrap().nonce(), 1);
        assert!(pool.pop_first().is_none());
    }

    #[test]
    fn find_matches_type_and_nonce() {
        let pool = EnvelopePool::new();
        pool.enqueue(legacy(5));
        pool.enqueue(eip1559(5));

        let found = pool.find_by_type_and_nonce(0x02, 5).unwrap();
        assert_eq!(found.tx_type(), 0x02);
        assert_eq!(found.nonce(), 5);

        assert!(pool.find_by_type_and_nonce(0x03, 5).is_none());
        assert!(pool.find_by_type_and_nonce(0x02, 6).is_none());
        // Lookup does not consume.
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn concurrent_producers_and_consumers() {
        let pool = Arc::new(EnvelopePool::new());
        let mut handles = Vec::new();

        for worker in 0..4u64 {
            let pool = Arc::clone(&pool);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    pool.enqueue(eip1559(worker * 100 + i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pool.len(), 100);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let pool = Arc::clone(&pool);
            handles.push(std::thread::spawn(move || {
                let mut taken = 0;
                while pool.pop_first().is_some() {
                    taken += 1;
                }
                taken
            }));
        }
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 100);
        assert!(pool.is_empty());
    }
}
