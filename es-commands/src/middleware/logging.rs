use super::{CmdHandlerFn, Middleware, handler};
use bon::Builder;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// 日志中间件
///
/// 在 `next` 前后计时，结束时输出一条结构化日志（`command`、`duration_ms`）：
/// - `next` 失败时为 `ERROR` 级别，并附带 `error`；
/// - 成功时为 `INFO` 级别；若配置了 `slow_threshold` 且耗时不低于该阈值，则为 `WARN`。
///
/// 整个调用同时处于名为 `command` 的 span 中，携带命令名与实体 ID。
#[derive(Builder, Clone, Debug, Default)]
pub struct LoggingMiddleware {
    slow_threshold: Option<Duration>,
}

/// 默认配置的日志中间件
pub fn logging() -> LoggingMiddleware {
    LoggingMiddleware::default()
}

impl Middleware for LoggingMiddleware {
    fn intercept(&self, next: CmdHandlerFn) -> CmdHandlerFn {
        let slow_threshold = self.slow_threshold;

        handler(move |ctx, entity_id, command| {
            let next = Arc::clone(&next);

            Box::pin(async move {
                let name = command.name().to_string();
                let span = tracing::info_span!("command", name = %name, entity_id = %entity_id);

                let start = Instant::now();
                let result = next(ctx, entity_id, command)
                    .instrument(span.clone())
                    .await;
                let duration = start.elapsed();
                let duration_ms = duration.as_millis() as u64;

                span.in_scope(|| match &result {
                    Err(err) => tracing::error!(
                        command = %name,
                        duration_ms,
                        error = %err,
                        "[commands] {:?} executed in {:?}: {}",
                        name,
                        duration,
                        err
                    ),
                    Ok(()) if slow_threshold.is_some_and(|limit| duration >= limit) => {
                        tracing::warn!(
                            command = %name,
                            duration_ms,
                            "[commands] {:?} executed in {:?} (slow)",
                            name,
                            duration
                        )
                    }
                    Ok(()) => tracing::info!(
                        command = %name,
                        duration_ms,
                        "[commands] {:?} executed in {:?}",
                        name,
                        duration
                    ),
                });

                result
            })
        })
    }
}
