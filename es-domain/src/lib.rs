//! 事件溯源领域层协议（es-domain）
//!
//! 定义命令分发核心所依赖的外部协作方接口：
//! - 事件内容（`content`）与已记录事件（`event`）
//! - 状态折叠所需的事件处理器（`handler`）
//! - 事件存储与事件流（`store`）
//! - 贯穿一次分发的执行上下文（`context`）
//!
//! 本 crate 不绑定任何存储后端，`in_memory` 仅作为测试与示例用的参考实现。
//!
pub mod any;
pub mod content;
pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod in_memory;
pub mod store;

pub use any::AsAny;
pub use content::{Content, Events};
pub use context::{BusinessContext, ExecutionContext};
pub use error::{DomainError, DomainResult};
pub use event::RecordedEvent;
pub use handler::EventHandler;
pub use in_memory::InMemoryStore;
pub use store::{Store, Stream};

/// `#[derive(Content)]`，可通过 `#[content(name = "...")]` 指定事件名
pub use es_macros::Content;

// 允许在本 crate 内部通过 ::es_domain 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::es_domain 路径。
extern crate self as es_domain;
