use bon::Builder;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// 业务上下文信息
#[derive(Builder, Default, Debug, Clone, Serialize, Deserialize)]
pub struct BusinessContext {
    /// 关联ID
    correlation_id: Option<String>,
    /// 因果ID
    causation_id: Option<String>,
    /// 触发命令的主体类型（如用户、系统等）
    actor_type: Option<String>,
    /// 触发命令的主体ID
    actor_id: Option<String>,
}

impl BusinessContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}

/// 执行上下文（Execution Context）
///
/// 承载一次命令分发所需的横切信息，并沿中间件、事件流与执行器一路传递：
/// - 业务语境（`BusinessContext`）：关联追踪 `correlation_id`、因果链 `causation_id` 等；
/// - 幂等键（`idempotency_key`）：由基础设施层决定是否参与幂等；
/// - 取消令牌（`cancellation`）：核心层不定义超时策略，是否及时响应取消由事件流实现决定。
///
/// ```rust
/// use es_domain::context::{BusinessContext, ExecutionContext};
///
/// let ctx = ExecutionContext {
///     biz: BusinessContext::builder()
///         .correlation_id("cor-123".into())
///         .actor_type("user".into())
///         .actor_id("u-1".into())
///         .build(),
///     idempotency_key: Some("idem-xyz".into()),
///     ..Default::default()
/// };
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExecutionContext {
    /// 业务语境（链路追踪、审计主体、操作因果）
    pub biz: BusinessContext,
    /// 幂等键（可选）
    pub idempotency_key: Option<String>,
    /// 取消令牌
    pub cancellation: CancellationToken,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_business(biz: BusinessContext) -> Self {
        Self {
            biz,
            ..Self::default()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// 取消当前上下文及其所有子上下文
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// 派生子上下文：继承业务语境，父级取消时随之取消，自身取消不影响父级
    pub fn child(&self) -> Self {
        Self {
            biz: self.biz.clone(),
            idempotency_key: self.idempotency_key.clone(),
            cancellation: self.cancellation.child_token(),
        }
    }
}
