//! 记录集加载助手
//!
//! 每个抓取数据的视图都遵循同一条"失效即重载"约定：
//! 变更成功后调用 `reload` 重新抓取，而不是各自维护过期判断。
//! 此助手把 (items, loading, error, reload) 四元组收拢到一处。

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::error::ApiResult;

/// 开始一轮新的重载，返回本轮代次
fn next_generation(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

/// 本轮结果是否已被更新的重载取代
fn superseded(counter: &AtomicU64, started: u64) -> bool {
    counter.load(Ordering::SeqCst) != started
}

/// 一张远程表的本地快照
pub struct RecordSet<T: Send + Sync + 'static> {
    items: ReadSignal<Vec<T>>,
    set_items: WriteSignal<Vec<T>>,
    loading: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
    set_error: WriteSignal<Option<String>>,
    reload: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for RecordSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for RecordSet<T> {}

impl<T: Send + Sync + 'static> RecordSet<T> {
    pub fn items(&self) -> ReadSignal<Vec<T>> {
        self.items
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading
    }

    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error
    }

    /// 设置/清除行内错误提示
    pub fn set_error(&self, message: Option<String>) {
        self.set_error.set(message);
    }

    /// 失效并重载
    pub fn reload(&self) {
        self.reload.run(());
    }

    /// 本地移除（删除成功后避免整表重载）
    pub fn retain(&self, predicate: impl Fn(&T) -> bool) {
        self.set_items.update(|items| items.retain(|it| predicate(it)));
    }
}

/// 创建记录集并发起首次加载
///
/// # Arguments
/// * `load_error` - 加载失败时的行内提示文案
/// * `load` - 抓取闭包，每次重载时调用
pub fn use_records<T, F, Fut>(load_error: &'static str, load: F) -> RecordSet<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<Vec<T>>> + 'static,
{
    let (items, set_items) = signal(Vec::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    // 重载代次：重叠的重载中只有最新一轮的结果落地
    let generation = Arc::new(AtomicU64::new(0));

    let reload = Callback::new(move |_: ()| {
        let started = next_generation(&generation);
        set_loading.set(true);
        set_error.set(None);
        let fut = load();
        let generation = Arc::clone(&generation);
        spawn_local(async move {
            let result = fut.await;
            if superseded(&generation, started) {
                return;
            }
            match result {
                Ok(data) => set_items.set(data),
                Err(err) => {
                    web_sys::console::error_1(&format!("load failed: {}", err).into());
                    set_error.set(Some(load_error.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let records = RecordSet {
        items,
        set_items,
        loading,
        error,
        set_error,
        reload,
    };
    // 初始加载
    records.reload();
    records
}

#[cfg(test)]
mod tests;
