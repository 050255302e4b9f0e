use catalogo::StateCell;
use leptos::prelude::*;

/// 供核心库流程使用的引用计数信号
///
/// 读取不追踪；写入照常通知订阅者，绑定的视图会在核心库每次修改后重新渲染。
/// 只要还有克隆存在，值就不会释放：页面卸载后才返回的请求仍可安全写入。
pub struct SignalCell<T: 'static>(ArcRwSignal<T>);

impl<T: Send + Sync + 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(ArcRwSignal::new(value))
    }

    /// 归属当前响应式作用域的可复制句柄（用于视图）
    pub fn signal(&self) -> RwSignal<T> {
        RwSignal::from(self.0.clone())
    }
}

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.0.write();
        f(&mut *guard)
    }
}
