//! 在途配置集合：同一配置 ID 同时至多一个轮询周期。

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// 在途配置集合
///
/// 测试并置位在同一把锁内完成；许可在 drop 时释放。
#[derive(Clone, Default)]
pub struct InFlightSet {
    ids: Arc<Mutex<HashSet<i64>>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试占用配置 ID；已被占用时返回 `None`。
    pub fn try_acquire(&self, id: i64) -> Option<InFlightPermit> {
        if !self.lock().insert(id) {
            return None;
        }
        Some(InFlightPermit {
            ids: self.ids.clone(),
            id,
        })
    }

    pub fn contains(&self, id: i64) -> bool {
        self.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<i64>> {
        // 锁内没有可能 panic 的操作，中毒时集合仍然一致
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 在途许可
#[derive(Debug)]
pub struct InFlightPermit {
    ids: Arc<Mutex<HashSet<i64>>>,
    id: i64,
}

impl InFlightPermit {
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        let mut ids = self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        ids.remove(&self.id);
    }
}
