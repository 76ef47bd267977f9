//! 类型擦除辅助
//!
//! 命令与事件内容在分发与存储环节以 trait object 形式流转，
//! 需要在边界处安全地还原为具体类型。
//!
use std::any::{Any, type_name};

/// 向 `Any` 的转换能力，对所有 `'static + Send` 类型自动实现
///
/// 注意：对 `Box<dyn Trait>` 调用时需先解引用（`(*boxed).type_name()`），
/// 否则方法解析会落到 `Box` 自身上。
pub trait AsAny: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;

    /// 运行时具体类型名（用于错误信息）
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}
