#![allow(dead_code)]

use async_trait::async_trait;
use es_commands::{CmdHandlerFn, Command, CommandError, Middleware, handler};
use es_domain::{
    Content, DomainError, DomainResult, EventHandler, Events, ExecutionContext, RecordedEvent,
    Store, Stream,
};
use std::sync::{Arc, Mutex};

// ---- commands ----

#[derive(Debug, Default, Command)]
pub struct TestCommand {
    pub value: String,
}

// 与 TestCommand 同名但类型不同
#[derive(Debug, Default, Command)]
#[command(name = "TestCommand")]
pub struct TestDoubleCommand {
    pub value: String,
}

#[derive(Debug, Default)]
pub struct TestPanicCommand;

impl Command for TestPanicCommand {
    fn name(&self) -> &str {
        panic!("TestPanicCommand")
    }
}

/// 名称由实例决定的命令
#[derive(Debug, Default)]
pub struct Named(pub String);

impl Command for Named {
    fn name(&self) -> &str {
        &self.0
    }
}

// ---- events & state ----

#[derive(Debug, Clone, PartialEq, Content)]
pub struct Deposited {
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Content)]
pub struct Withdrawn {
    pub amount: u64,
}

#[derive(Debug, Default)]
pub struct StateMock {
    pub handled: Vec<u64>,
}

impl EventHandler for StateMock {
    fn handle(&mut self, event: &RecordedEvent) -> DomainResult<()> {
        self.handled.push(event.event_number());
        Ok(())
    }
}

/// 回放到第一个事件时 panic 的状态
#[derive(Debug, Default)]
pub struct PanickingState;

impl EventHandler for PanickingState {
    fn handle(&mut self, _event: &RecordedEvent) -> DomainResult<()> {
        panic!("corrupted history")
    }
}

// ---- store ----

#[derive(Default)]
pub struct Calls {
    pub opened: Vec<(String, String)>,
    pub projections: usize,
    pub writes: Vec<Events>,
    pub closes: usize,
}

/// 记录调用的事件存储，可按需让各环节返回错误
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub history: Vec<Arc<dyn Content>>,
    pub project_error: Option<&'static str>,
    pub write_error: Option<&'static str>,
    pub close_error: Option<&'static str>,
    pub calls: Arc<Mutex<Calls>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, history: Vec<Arc<dyn Content>>) -> Self {
        self.history = history;
        self
    }

    pub fn failing_project(mut self, reason: &'static str) -> Self {
        self.project_error = Some(reason);
        self
    }

    pub fn failing_write(mut self, reason: &'static str) -> Self {
        self.write_error = Some(reason);
        self
    }

    pub fn failing_close(mut self, reason: &'static str) -> Self {
        self.close_error = Some(reason);
        self
    }

    pub fn opened(&self) -> usize {
        self.calls.lock().unwrap().opened.len()
    }

    pub fn projections(&self) -> usize {
        self.calls.lock().unwrap().projections
    }

    pub fn write_count(&self) -> usize {
        self.calls.lock().unwrap().writes.len()
    }

    pub fn closes(&self) -> usize {
        self.calls.lock().unwrap().closes
    }

    /// 第 n 次写入的事件，还原为具体类型
    pub fn written<T: Content + Clone>(&self, n: usize) -> Vec<T> {
        self.calls.lock().unwrap().writes[n]
            .iter()
            .filter_map(|e| e.downcast_ref::<T>().cloned())
            .collect()
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn open(
        &self,
        _ctx: &ExecutionContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Box<dyn Stream> {
        self.calls
            .lock()
            .unwrap()
            .opened
            .push((entity_type.to_string(), entity_id.to_string()));

        Box::new(RecordingStream {
            store: self.clone(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
        })
    }
}

struct RecordingStream {
    store: RecordingStore,
    entity_type: String,
    entity_id: String,
}

#[async_trait]
impl Stream for RecordingStream {
    async fn project(&mut self, handler: &mut dyn EventHandler) -> DomainResult<()> {
        self.store.calls.lock().unwrap().projections += 1;

        if let Some(reason) = self.store.project_error {
            return Err(DomainError::EventStore {
                reason: reason.to_string(),
            });
        }

        for (i, content) in self.store.history.iter().enumerate() {
            let event = RecordedEvent::builder()
                .entity_type(self.entity_type.clone())
                .entity_id(self.entity_id.clone())
                .event_number(i as u64 + 1)
                .content(Arc::clone(content))
                .build();
            handler.handle(&event)?;
        }

        Ok(())
    }

    async fn write(&mut self, events: Events) -> DomainResult<()> {
        self.store.calls.lock().unwrap().writes.push(events);

        match self.store.write_error {
            Some(reason) => Err(DomainError::EventStore {
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn close(&mut self) -> DomainResult<()> {
        self.store.calls.lock().unwrap().closes += 1;

        match self.store.close_error {
            Some(reason) => Err(DomainError::EventStore {
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// ---- middleware ----

/// 记录调用顺序的中间件，`deny` 为 `Some` 时不调用 `next` 直接返回错误
pub fn recording_middleware(
    label: &'static str,
    trace: Arc<Mutex<Vec<String>>>,
    deny: Option<&'static str>,
) -> Arc<dyn Middleware> {
    Arc::new(move |next: CmdHandlerFn| -> CmdHandlerFn {
        let trace = Arc::clone(&trace);
        handler(move |ctx, entity_id, command| {
            let next = Arc::clone(&next);
            let trace = Arc::clone(&trace);
            Box::pin(async move {
                trace.lock().unwrap().push(format!("{label}:in"));
                let result = match deny {
                    Some(reason) => Err(CommandError::Validation(reason.to_string())),
                    None => next(ctx, entity_id, command).await,
                };
                let outcome = match &result {
                    Ok(()) => "ok".to_string(),
                    Err(err) => err.to_string(),
                };
                trace.lock().unwrap().push(format!("{label}:out:{outcome}"));
                result
            })
        })
    })
}
