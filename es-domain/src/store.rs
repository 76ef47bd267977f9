//! 事件存储协议（Store / Stream）
//!
//! 核心层只依赖以下两个接口编排“打开 → 投影 → 写入 → 关闭”的流程，
//! 持久化、编码与并发写冲突检测全部由实现方负责。
//!
use crate::{
    content::Events, context::ExecutionContext, error::DomainResult, handler::EventHandler,
};
use async_trait::async_trait;
use std::sync::Arc;

/// 单个实体的事件流句柄
///
/// 每次 `open` 得到的句柄只应被 `close` 一次。
#[async_trait]
pub trait Stream: Send {
    /// 将全部历史事件按顺序回放到处理器
    async fn project(&mut self, handler: &mut dyn EventHandler) -> DomainResult<()>;

    /// 追加事件，保持给定顺序
    async fn write(&mut self, events: Events) -> DomainResult<()>;

    /// 释放事件流占用的资源
    async fn close(&mut self) -> DomainResult<()>;
}

/// 事件存储：按实体类型与实体 ID 打开事件流
///
/// 打开本身不会失败，错误通过事件流上的操作暴露。
#[async_trait]
pub trait Store: Send + Sync {
    async fn open(
        &self,
        ctx: &ExecutionContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Box<dyn Stream>;
}

#[async_trait]
impl<T> Store for Arc<T>
where
    T: Store + ?Sized,
{
    async fn open(
        &self,
        ctx: &ExecutionContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Box<dyn Stream> {
        (**self).open(ctx, entity_type, entity_id).await
    }
}
