//! 执行流水线
//!
//! 每个已注册命令对应一条流水线：类型校验 → 打开事件流 → 投影状态 → 执行 → 按需写入 → 关闭。
//! 事件流在每一条退出路径上都恰好关闭一次，并先于结果返回。
//!
use crate::{
    command::Command,
    error::{CommandError, CommandResult},
    executor::{Executor, State},
    middleware::{CmdHandlerFn, handler},
};
use es_domain::{AsAny, ExecutionContext, Store, Stream};
use futures_util::FutureExt;
use std::any::type_name;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// 为 (C, S) 生成类型擦除的流水线
pub(crate) fn decorate<C, S, F, X>(
    store: Arc<dyn Store>,
    entity_type: String,
    new_state: F,
    executor: X,
) -> CmdHandlerFn
where
    C: Command,
    S: State,
    F: Fn() -> S + Send + Sync + 'static,
    X: Executor<C, S> + 'static,
{
    let entity_type: Arc<str> = Arc::from(entity_type);
    let new_state = Arc::new(new_state);
    let executor = Arc::new(executor);

    handler(move |ctx, entity_id, command| {
        let store = Arc::clone(&store);
        let entity_type = Arc::clone(&entity_type);
        let new_state = Arc::clone(&new_state);
        let executor = Arc::clone(&executor);

        Box::pin(async move {
            let command = downcast::<C>(command)?;

            let mut stream = store.open(ctx, &entity_type, entity_id).await;

            // 状态构造、投影或执行器中的 panic 也要先关闭事件流，再继续展开
            let outcome = AssertUnwindSafe(async {
                run(ctx, &mut *stream, new_state(), executor.as_ref(), command).await
            })
            .catch_unwind()
            .await;

            if let Err(err) = stream.close().await {
                tracing::warn!(
                    entity_type = %entity_type,
                    entity_id = %entity_id,
                    error = %err,
                    "failed to close stream"
                );
            }

            match outcome {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    })
}

async fn run<C, S, X>(
    ctx: &ExecutionContext,
    stream: &mut dyn Stream,
    mut state: S,
    executor: &X,
    command: C,
) -> CommandResult<()>
where
    C: Command,
    S: State,
    X: Executor<C, S>,
{
    stream.project(&mut state).await?;

    let events = executor.execute(ctx, command, &state).await?;
    if events.is_empty() {
        tracing::debug!("executor produced no events; nothing to write");
        return Ok(());
    }

    tracing::debug!(count = events.len(), "writing events");
    stream.write(events).await?;

    Ok(())
}

/// 将分发得到的命令还原为注册时绑定的具体类型，类型不符时失败
fn downcast<C: Command>(command: Box<dyn Command>) -> CommandResult<C> {
    let name = command.name().to_string();
    let found = AsAny::type_name(&*command);

    AsAny::into_any(command)
        .downcast::<C>()
        .map(|command| *command)
        .map_err(|_| CommandError::TypeMismatch {
            command: name,
            expected: type_name::<C>(),
            found,
        })
}
