//! 事件溯源命令分发核心（es-commands）
//!
//! 调用方将命令寻址到某个实体，核心层负责：
//! - 按命令名找到注册时按 (命令类型, 状态类型) 单态化的流水线；
//! - 依声明顺序运行中间件链（日志、校验、指标等），任一层可短路；
//! - 打开实体事件流、回放历史得到状态、调用执行器，有事件时写回，最后关闭事件流。
//!
//! 持久化、编码与并发写冲突检测由 [`es_domain::Store`] 的实现负责。
//!
//! 典型用法：
//! 1. 用 `#[derive(Command)]` 定义命令，为状态实现 [`es_domain::EventHandler`]；
//! 2. 以存储与中间件构造 [`Dispatcher`]；
//! 3. 通过 `register` / `register_fn` / `register_with` 绑定执行器；
//! 4. 调用 `dispatch` 分发命令。
//!
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod middleware;
mod pipeline;

pub use command::Command;
pub use dispatcher::Dispatcher;
pub use error::{CommandError, CommandResult};
pub use executor::{Executor, ExecutorFn, State};
pub use middleware::{
    CmdHandlerFn, LoggingMiddleware, Middleware, MetricsMiddleware, handler, logging, metrics,
    validate, validator, validator_for,
};

/// `#[derive(Command)]`，可通过 `#[command(name = "...")]` 指定命令名
pub use es_macros::Command;

// 允许在本 crate 内部通过 ::es_commands 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::es_commands 路径。
extern crate self as es_commands;
