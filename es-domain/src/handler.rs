//! 事件处理器（EventHandler）
//!
//! 投影时由事件流逐条回放历史事件到处理器，处理器据此折叠出自身状态。
//!
use crate::{error::DomainResult, event::RecordedEvent};

/// 能够吸收（折叠）事件序列的处理器
pub trait EventHandler: Send {
    /// 按事件流顺序处理单个事件，返回错误将中止投影
    fn handle(&mut self, event: &RecordedEvent) -> DomainResult<()>;
}
