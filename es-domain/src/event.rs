use crate::any::AsAny;
use crate::content::Content;
use crate::error::{DomainError, DomainResult};
use bon::Builder;
use chrono::{DateTime, Utc};
use std::any::type_name;
use std::sync::Arc;
use uuid::Uuid;

/// 已记录事件：事件流在投影时交给 [`EventHandler`](crate::handler::EventHandler) 的单元
///
/// - `event_number` 为该事件在实体事件流中的位置（从 1 开始）；
/// - `correlation_id`/`causation_id` 来自写入时的调用上下文。
#[derive(Builder, Debug, Clone)]
pub struct RecordedEvent {
    entity_type: String,
    entity_id: String,
    event_number: u64,
    #[builder(default = Uuid::new_v4())]
    event_id: Uuid,
    #[builder(default = Utc::now())]
    occurred_at: DateTime<Utc>,
    correlation_id: Option<String>,
    causation_id: Option<String>,
    content: Arc<dyn Content>,
}

impl RecordedEvent {
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn event_number(&self) -> u64 {
        self.event_number
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn event_name(&self) -> &str {
        self.content.event_name()
    }

    pub fn content(&self) -> &(dyn Content + 'static) {
        self.content.as_ref()
    }

    /// 将内容还原为具体事件类型，类型不符时返回 `None`
    pub fn content_as<T: Content>(&self) -> Option<&T> {
        self.content().downcast_ref::<T>()
    }

    /// 同 [`content_as`](Self::content_as)，类型不符时返回 `TypeMismatch`
    pub fn try_content_as<T: Content>(&self) -> DomainResult<&T> {
        self.content_as::<T>().ok_or_else(|| DomainError::TypeMismatch {
            expected: type_name::<T>().to_string(),
            found: AsAny::type_name(self.content()).to_string(),
        })
    }
}
