//! 基于内存的事件存储
//!
//! 用于测试与示例的参考实现：事件保存在进程内，不提供持久化。
//! 写入时做乐观并发检查：若事件流在投影之后被其他句柄推进，写入返回 `VersionConflict`。
//!
use crate::{
    content::Events,
    context::ExecutionContext,
    error::{DomainError, DomainResult},
    event::RecordedEvent,
    handler::EventHandler,
    store::{Store, Stream},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type StreamKey = (String, String);
type StreamLog = Arc<RwLock<HashMap<StreamKey, Vec<RecordedEvent>>>>;

/// 进程内事件存储
#[derive(Clone, Default)]
pub struct InMemoryStore {
    streams: StreamLog,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取实体事件流的全部事件（只读副本）
    pub async fn events(&self, entity_type: &str, entity_id: &str) -> Vec<RecordedEvent> {
        let key = (entity_type.to_string(), entity_id.to_string());
        self.streams
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// 实体事件流当前版本（即已记录事件数）
    pub async fn version(&self, entity_type: &str, entity_id: &str) -> u64 {
        let key = (entity_type.to_string(), entity_id.to_string());
        self.streams
            .read()
            .await
            .get(&key)
            .map_or(0, |events| events.len() as u64)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn open(
        &self,
        ctx: &ExecutionContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Box<dyn Stream> {
        Box::new(InMemoryStream {
            ctx: ctx.clone(),
            key: (entity_type.to_string(), entity_id.to_string()),
            streams: Arc::clone(&self.streams),
            version: 0,
            closed: false,
        })
    }
}

struct InMemoryStream {
    ctx: ExecutionContext,
    key: StreamKey,
    streams: StreamLog,
    // 本句柄最后一次观察到的事件流版本
    version: u64,
    closed: bool,
}

impl InMemoryStream {
    fn ensure_usable(&self) -> DomainResult<()> {
        if self.closed {
            return Err(DomainError::StreamClosed {
                entity_type: self.key.0.clone(),
                entity_id: self.key.1.clone(),
            });
        }

        if self.ctx.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        Ok(())
    }
}

#[async_trait]
impl Stream for InMemoryStream {
    async fn project(&mut self, handler: &mut dyn EventHandler) -> DomainResult<()> {
        self.ensure_usable()?;

        // 先复制再回放，避免在处理器执行期间持有锁
        let history = self
            .streams
            .read()
            .await
            .get(&self.key)
            .cloned()
            .unwrap_or_default();

        for event in &history {
            handler.handle(event)?;
        }

        self.version = history.len() as u64;

        Ok(())
    }

    async fn write(&mut self, events: Events) -> DomainResult<()> {
        self.ensure_usable()?;

        let mut streams = self.streams.write().await;
        let log = streams.entry(self.key.clone()).or_default();

        let actual = log.len() as u64;
        if actual != self.version {
            return Err(DomainError::VersionConflict {
                expected: self.version,
                actual,
            });
        }

        for content in events {
            self.version += 1;
            log.push(
                RecordedEvent::builder()
                    .entity_type(self.key.0.clone())
                    .entity_id(self.key.1.clone())
                    .event_number(self.version)
                    .maybe_correlation_id(self.ctx.biz.correlation_id().map(str::to_string))
                    .maybe_causation_id(self.ctx.biz.causation_id().map(str::to_string))
                    .content(Arc::from(content))
                    .build(),
            );
        }

        tracing::debug!(
            entity_type = %self.key.0,
            entity_id = %self.key.1,
            version = self.version,
            "events appended"
        );

        Ok(())
    }

    async fn close(&mut self) -> DomainResult<()> {
        if self.closed {
            return Err(DomainError::StreamClosed {
                entity_type: self.key.0.clone(),
                entity_id: self.key.1.clone(),
            });
        }

        self.closed = true;

        Ok(())
    }
}
