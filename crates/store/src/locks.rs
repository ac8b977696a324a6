use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Hands out one async mutex per account id.
///
/// A trade holds the lock(s) of every account it touches for the whole
/// read-compute-write sequence, which rules out lost updates between
/// concurrent trades on the same account. Pair acquisition always locks the
/// smaller id first, so two sells involving the same pair of accounts in
/// opposite roles can never circular-wait.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    /// Locks a single account for the duration of the returned guard.
    pub async fn acquire(&self, id: Uuid) -> OwnedMutexGuard<()> {
        self.handle(id).lock_owned().await
    }

    /// Locks two distinct accounts in ascending-id order.
    ///
    /// The returned guards are (lock for `a`, lock for `b`) regardless of
    /// acquisition order.
    pub async fn acquire_pair(&self, a: Uuid, b: Uuid) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b, "two-account acquisition requires distinct accounts");
        if a < b {
            let guard_a = self.handle(a).lock_owned().await;
            let guard_b = self.handle(b).lock_owned().await;
            (guard_a, guard_b)
        } else {
            let guard_b = self.handle(b).lock_owned().await;
            let guard_a = self.handle(a).lock_owned().await;
            (guard_a, guard_b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn opposite_role_pairs_do_not_deadlock() {
        let registry = Arc::new(LockRegistry::new());
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let mut tasks = Vec::new();
        for i in 0..50 {
            let registry = Arc::clone(&registry);
            // Alternate the roles so both acquisition orders are exercised.
            let (x, y) = if i % 2 == 0 { (a, b) } else { (b, a) };
            tasks.push(tokio::spawn(async move {
                let _guards = registry.acquire_pair(x, y).await;
                tokio::task::yield_now().await;
            }));
        }

        let all = async {
            for task in tasks {
                task.await.unwrap();
            }
        };
        tokio::time::timeout(Duration::from_secs(5), all)
            .await
            .expect("pair acquisition deadlocked");
    }

    #[tokio::test]
    async fn single_lock_serializes_critical_sections() {
        let registry = Arc::new(LockRegistry::new());
        let id = Uuid::new_v4();

        let guard = registry.acquire(id).await;
        let registry2 = Arc::clone(&registry);
        let waiter = tokio::spawn(async move {
            let _guard = registry2.acquire(id).await;
        });

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());
        drop(guard);
        waiter.await.unwrap();
    }
}
