use crate::{
    command::{self, Command},
    error::{CommandError, CommandResult},
    executor::{Executor, ExecutorFn, State},
    middleware::{self, CmdHandlerFn, Middleware},
    pipeline,
};
use bon::Builder;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use es_domain::{Events, ExecutionContext, Store};
use std::any::type_name;
use std::sync::Arc;

/// 命令分发器
///
/// - 以命令名为键保存经中间件装饰的流水线，注册后不可覆盖、不可移除；
/// - 注册与分发可并发进行：查找之间互不阻塞，注册对并发的分发要么整体可见、要么整体不可见；
/// - 中间件列表在构造时确定，每次注册时组合一次，分发时不再重新组合。
///
/// ```rust
/// use es_commands::{Dispatcher, Middleware, logging};
/// use es_domain::InMemoryStore;
/// use std::sync::Arc;
///
/// let middlewares: Vec<Arc<dyn Middleware>> = vec![Arc::new(logging())];
/// let dispatcher = Dispatcher::builder()
///     .store(Arc::new(InMemoryStore::new()))
///     .middlewares(middlewares)
///     .build();
/// assert!(dispatcher.registered_commands().is_empty());
/// ```
#[derive(Builder)]
pub struct Dispatcher {
    store: Arc<dyn Store>,
    #[builder(skip)]
    executors: DashMap<String, CmdHandlerFn>,
    #[builder(default)]
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_middlewares(store, Vec::new())
    }

    /// 以给定的中间件创建分发器，首个中间件位于最外层
    pub fn with_middlewares(store: Arc<dyn Store>, middlewares: Vec<Arc<dyn Middleware>>) -> Self {
        Self::builder().store(store).middlewares(middlewares).build()
    }

    /// 注册执行器，命令与状态均以 `Default` 构造
    pub fn register<C, S, X>(&self, entity_type: impl Into<String>, executor: X) -> CommandResult<()>
    where
        C: Command + Default,
        S: State + Default,
        X: Executor<C, S> + 'static,
    {
        self.register_with(entity_type, C::default, S::default, executor)
    }

    /// 以同步闭包注册执行器
    pub fn register_fn<C, S, F>(&self, entity_type: impl Into<String>, executor: F) -> CommandResult<()>
    where
        C: Command + Default,
        S: State + Default,
        F: Fn(&ExecutionContext, C, &S) -> CommandResult<Events> + Send + Sync + 'static,
    {
        self.register::<C, S, _>(entity_type, ExecutorFn::new(executor))
    }

    /// 注册执行器，显式提供命令与状态的零值构造函数
    ///
    /// 路由名取自 `new_command()` 的 `name()`；构造或取名时发生的 panic 会被捕获并以
    /// `NamingFailed` 返回，分发器仍可继续使用。同名命令重复注册返回 `AlreadyRegistered`，
    /// 已有的注册保持不变。
    pub fn register_with<C, S, N, F, X>(
        &self,
        entity_type: impl Into<String>,
        new_command: N,
        new_state: F,
        executor: X,
    ) -> CommandResult<()>
    where
        C: Command,
        S: State,
        N: FnOnce() -> C,
        F: Fn() -> S + Send + Sync + 'static,
        X: Executor<C, S> + 'static,
    {
        let command_type = type_name::<C>();

        let name = command::resolve_name(|| new_command().name().to_string())
            .map_err(|reason| CommandError::NamingFailed {
                command_type,
                reason,
            })?;

        if name.trim().is_empty() {
            return Err(CommandError::NamingFailed {
                command_type,
                reason: "command name is empty".to_string(),
            });
        }

        let entity_type = entity_type.into();
        let pipeline = pipeline::decorate::<C, S, F, X>(
            Arc::clone(&self.store),
            entity_type.clone(),
            new_state,
            executor,
        );
        let pipeline = middleware::chain(&self.middlewares, pipeline);

        match self.executors.entry(name) {
            Entry::Occupied(entry) => Err(CommandError::AlreadyRegistered {
                command: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(
                    command = %entry.key(),
                    command_type,
                    entity_type = %entity_type,
                    "command registered"
                );
                entry.insert(pipeline);
                Ok(())
            }
        }
    }

    /// 分发命令到对应流水线
    pub async fn dispatch<C>(&self, ctx: &ExecutionContext, entity_id: &str, command: C) -> CommandResult<()>
    where
        C: Command,
    {
        self.dispatch_boxed(ctx, entity_id, Box::new(command)).await
    }

    /// 分发类型擦除的命令
    ///
    /// 命令名为空或取名时 panic 视为非法输入，在查表之前即被拒绝。
    pub async fn dispatch_boxed(
        &self,
        ctx: &ExecutionContext,
        entity_id: &str,
        command: Box<dyn Command>,
    ) -> CommandResult<()> {
        let name = command::resolve_name(|| command.name().to_string()).map_err(|reason| {
            CommandError::InvalidCommand {
                reason: format!("command name panicked: {reason}"),
            }
        })?;

        if name.trim().is_empty() {
            return Err(CommandError::InvalidCommand {
                reason: "command name is empty".to_string(),
            });
        }

        let Some(f) = self.executors.get(&name).map(|h| Arc::clone(h.value())) else {
            return Err(CommandError::NotRegistered { command: name });
        };

        (f)(ctx, entity_id, command).await
    }

    /// 获取已注册的命令名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<String> {
        self.executors.iter().map(|e| e.key().clone()).collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.executors.contains_key(name)
    }
}
