//! 事件内容（Content）
//!
//! 执行器产出、事件流持久化的不透明载荷。核心层只负责在执行器与事件流之间原样传递，
//! 不解析其结构；事件流可借助 `event_name` 做诊断或路由。
//!
use crate::any::AsAny;
use std::fmt;

/// 事件内容需要满足的最小能力边界
pub trait Content: AsAny + fmt::Debug + Sync {
    /// 事件的稳定名称（建议常量字符串，不随重构变化）
    fn event_name(&self) -> &str;
}

impl dyn Content {
    /// 判断内容是否为指定的具体类型
    pub fn is<T: Content>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// 以引用方式还原为具体类型
    pub fn downcast_ref<T: Content>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// 执行器一次决策产出的有序事件列表，空列表表示“无变更”
pub type Events = Vec<Box<dyn Content>>;
