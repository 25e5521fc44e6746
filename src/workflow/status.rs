//! 状态汇报
//!
//! busy / error / success 三元组的唯一持有者。每次变化都通过 `watch` 通道广播，
//! 渲染端（或测试）可以在请求挂起期间观察到 busy。

use tokio::sync::watch;
use tracing::debug;

/// 最近一次操作的瞬时状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub busy: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// 状态汇报器
#[derive(Debug)]
pub struct StatusReporter {
    tx: watch::Sender<Status>,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Status::default());
        Self { tx }
    }

    /// 开始一次操作：清空 error / success 并置 busy
    ///
    /// 返回的守卫在任何退出路径上被丢弃时都会释放 busy。
    pub fn begin(&self) -> BusyGuard<'_> {
        self.tx.send_modify(|s| {
            s.busy = true;
            s.error = None;
            s.success = None;
        });
        debug!("busy = true");
        BusyGuard { reporter: self }
    }

    /// 本地校验失败：不进入 busy，只报告错误
    pub fn reject(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| {
            s.error = Some(message);
            s.success = None;
        });
    }

    /// 报告一个与当前操作无关的错误（例如列表刷新失败）
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| s.error = Some(message));
    }

    pub fn snapshot(&self) -> Status {
        self.tx.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.tx.borrow().busy
    }

    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.tx.subscribe()
    }

    /// 清空 error / success（不影响 busy）
    pub fn clear_messages(&self) {
        self.tx.send_modify(|s| {
            s.error = None;
            s.success = None;
        });
    }
}

/// 操作期间持有的 busy 守卫
#[must_use = "busy 会在守卫被丢弃时立即释放"]
pub struct BusyGuard<'a> {
    reporter: &'a StatusReporter,
}

impl BusyGuard<'_> {
    pub fn succeed(&self, message: impl Into<String>) {
        let message = message.into();
        self.reporter.tx.send_modify(|s| {
            s.success = Some(message);
            s.error = None;
        });
    }

    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.reporter.tx.send_modify(|s| {
            s.error = Some(message);
            s.success = None;
        });
    }

    pub fn reporter(&self) -> &StatusReporter {
        self.reporter
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.reporter.tx.send_modify(|s| s.busy = false);
        debug!("busy = false");
    }
}
