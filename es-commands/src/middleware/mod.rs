//! 中间件（Middleware）
//!
//! 中间件是从“下一个处理器”到“包装后处理器”的变换（续延传递风格）。
//! 按声明顺序 M1..Mn 组合后，M1 位于最外层：进入顺序为 M1、M2 … Mn、核心流水线，
//! 返回顺序相反。任一中间件不调用 `next` 即短路，更内层与核心流水线都不会执行。
//!
mod logging;
mod metrics;
mod validate;

pub use self::logging::{LoggingMiddleware, logging};
pub use self::metrics::{MetricsMiddleware, describe_metrics, metrics};
pub use self::validate::{validate, validator, validator_for};

use crate::{command::Command, error::CommandResult};
use es_domain::ExecutionContext;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// 命令处理器：接收执行上下文、实体 ID 与命令
pub type CmdHandlerFn = Arc<
    dyn for<'a> Fn(&'a ExecutionContext, &'a str, Box<dyn Command>) -> BoxFuture<'a, CommandResult<()>>
        + Send
        + Sync,
>;

/// 将闭包包装为 [`CmdHandlerFn`]，并为其推导出高阶生命周期签名
pub fn handler<F>(f: F) -> CmdHandlerFn
where
    F: for<'a> Fn(&'a ExecutionContext, &'a str, Box<dyn Command>) -> BoxFuture<'a, CommandResult<()>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

pub trait Middleware: Send + Sync {
    fn intercept(&self, next: CmdHandlerFn) -> CmdHandlerFn;
}

impl<F> Middleware for F
where
    F: Fn(CmdHandlerFn) -> CmdHandlerFn + Send + Sync,
{
    fn intercept(&self, next: CmdHandlerFn) -> CmdHandlerFn {
        self(next)
    }
}

/// 由内向外逐层包装，使首个声明的中间件成为最外层
pub(crate) fn chain(middlewares: &[Arc<dyn Middleware>], inner: CmdHandlerFn) -> CmdHandlerFn {
    middlewares
        .iter()
        .rev()
        .fold(inner, |next, middleware| middleware.intercept(next))
}
