use super::{CmdHandlerFn, Middleware, handler};
use crate::{command::Command, error::CommandResult};
use es_domain::{AsAny, ExecutionContext};
use std::sync::Arc;

/// 由用户提供的变换构造校验中间件
///
/// 校验逻辑作为一等拦截器注入，决定是否继续调用 `next`。
pub fn validate<F>(transform: F) -> impl Middleware
where
    F: Fn(CmdHandlerFn) -> CmdHandlerFn + Send + Sync + 'static,
{
    transform
}

/// 以断言函数构造校验中间件：返回 `Ok` 时继续，返回错误时短路
pub fn validator<F>(check: F) -> impl Middleware
where
    F: Fn(&ExecutionContext, &(dyn Command + 'static)) -> CommandResult<()> + Send + Sync + 'static,
{
    let check = Arc::new(check);

    move |next: CmdHandlerFn| -> CmdHandlerFn {
        let check = Arc::clone(&check);

        handler(move |ctx, entity_id, command| {
            let next = Arc::clone(&next);
            let verdict = check(ctx, &*command);

            Box::pin(async move {
                verdict?;
                next(ctx, entity_id, command).await
            })
        })
    }
}

/// 只校验指定类型 `C` 的命令，其他命令直接放行
pub fn validator_for<C, F>(check: F) -> impl Middleware
where
    C: Command,
    F: Fn(&ExecutionContext, &C) -> CommandResult<()> + Send + Sync + 'static,
{
    validator(move |ctx, command| match AsAny::as_any(command).downcast_ref::<C>() {
        Some(command) => check(ctx, command),
        None => Ok(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct Transfer {
        amount: i64,
    }

    impl Command for Transfer {
        fn name(&self) -> &str {
            "Transfer"
        }
    }

    #[derive(Default)]
    struct Close;

    impl Command for Close {
        fn name(&self) -> &str {
            "Close"
        }
    }

    fn counting(calls: Arc<AtomicUsize>) -> CmdHandlerFn {
        handler(move |_ctx, _entity_id, _command| {
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
    }

    #[tokio::test]
    async fn transform_runs_around_next() {
        let called = Arc::new(AtomicBool::new(false));
        let next_called = Arc::new(AtomicBool::new(false));

        let sut = {
            let called = Arc::clone(&called);
            validate(move |next: CmdHandlerFn| -> CmdHandlerFn {
                let called = Arc::clone(&called);
                handler(move |ctx, entity_id, command| {
                    let next = Arc::clone(&next);
                    called.store(true, Ordering::SeqCst);
                    Box::pin(async move { next(ctx, entity_id, command).await })
                })
            })
        };

        let inner = {
            let next_called = Arc::clone(&next_called);
            handler(move |_ctx, _entity_id, _command| {
                next_called.store(true, Ordering::SeqCst);
                Box::pin(async { Ok(()) })
            })
        };

        sut.intercept(inner)(&ExecutionContext::new(), "e-1", Box::new(Close))
            .await
            .unwrap();

        assert!(called.load(Ordering::SeqCst), "expected validator to be called");
        assert!(next_called.load(Ordering::SeqCst), "expected next to be called");
    }

    #[tokio::test]
    async fn validator_short_circuits_on_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sut = validator(|_ctx, command| {
            if command.name() == "Close" {
                Err(CommandError::Validation("closing is disabled".into()))
            } else {
                Ok(())
            }
        })
        .intercept(counting(Arc::clone(&calls)));

        let ctx = ExecutionContext::new();
        sut(&ctx, "e-1", Box::new(Transfer { amount: 1 })).await.unwrap();
        let err = sut(&ctx, "e-1", Box::new(Close)).await.unwrap_err();

        assert!(matches!(err, CommandError::Validation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn typed_validator_ignores_other_commands() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sut = validator_for(|_ctx, transfer: &Transfer| {
            if transfer.amount <= 0 {
                return Err(CommandError::Validation("amount must be > 0".into()));
            }
            Ok(())
        })
        .intercept(counting(Arc::clone(&calls)));

        let ctx = ExecutionContext::new();
        sut(&ctx, "e-1", Box::new(Close)).await.unwrap();
        sut(&ctx, "e-1", Box::new(Transfer { amount: 5 })).await.unwrap();
        let err = sut(&ctx, "e-1", Box::new(Transfer { amount: 0 }))
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Validation(ref msg) if msg == "amount must be > 0"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
