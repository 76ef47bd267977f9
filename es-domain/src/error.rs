//! 领域层统一错误定义
//!
//! 聚焦事件流的打开、投影、写入与关闭环节，
//! 便于各存储实现统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（事件流协议最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 事件存储 ---
    #[error("event store error: {reason}")]
    EventStore { reason: String },
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: u64, actual: u64 },
    #[error("stream closed: type={entity_type}, id={entity_id}")]
    StreamClosed {
        entity_type: String,
        entity_id: String,
    },

    // --- 上下文 ---
    #[error("operation cancelled")]
    Cancelled,

    // --- 领域规则/状态 ---
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
