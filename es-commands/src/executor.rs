//! 状态（State）与执行器（Executor）
//!
//! 执行器是纯决策函数：给定命令与回放得到的状态，返回应追加的事件或错误。
//! 除返回的事件外不应产生任何可观察的副作用。
//!
use crate::{command::Command, error::CommandResult};
use async_trait::async_trait;
use es_domain::{EventHandler, Events, ExecutionContext};
use std::sync::Arc;

/// 可通过折叠事件流重建的状态
///
/// 每次分发都会新建一个状态实例并回放全部历史，用完即弃。
pub trait State: EventHandler + Sync + 'static {}

impl<T> State for T where T: EventHandler + Sync + 'static {}

#[async_trait]
pub trait Executor<C, S>: Send + Sync
where
    C: Command,
    S: State,
{
    /// 空事件列表表示“无变更”，属于合法结果
    async fn execute(&self, ctx: &ExecutionContext, cmd: C, state: &S) -> CommandResult<Events>;
}

#[async_trait]
impl<C, S, T> Executor<C, S> for Arc<T>
where
    C: Command,
    S: State,
    T: Executor<C, S> + ?Sized,
{
    async fn execute(&self, ctx: &ExecutionContext, cmd: C, state: &S) -> CommandResult<Events> {
        (**self).execute(ctx, cmd, state).await
    }
}

/// 以同步闭包实现的执行器
pub struct ExecutorFn<F>(F);

impl<F> ExecutorFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<C, S, F> Executor<C, S> for ExecutorFn<F>
where
    C: Command,
    S: State,
    F: Fn(&ExecutionContext, C, &S) -> CommandResult<Events> + Send + Sync,
{
    async fn execute(&self, ctx: &ExecutionContext, cmd: C, state: &S) -> CommandResult<Events> {
        (self.0)(ctx, cmd, state)
    }
}
