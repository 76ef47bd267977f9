use super::{CmdHandlerFn, Middleware, handler};
use ::metrics::{Unit, counter, describe_counter, describe_histogram, histogram};
use std::sync::Arc;
use std::time::Instant;

/// 指标中间件
///
/// 通过 `metrics` 门面记录：
/// - `commands_dispatched_total{command, outcome}`：分发次数，`outcome` 为 `ok` 或 `error`；
/// - `commands_duration_seconds{command}`：处理耗时。
///
/// 未安装 recorder 时记录为空操作。
#[derive(Clone, Debug, Default)]
pub struct MetricsMiddleware;

pub fn metrics() -> MetricsMiddleware {
    MetricsMiddleware
}

/// 注册指标描述，供 exporter 展示
pub fn describe_metrics() {
    describe_counter!(
        "commands_dispatched_total",
        Unit::Count,
        "Number of dispatched commands by name and outcome"
    );
    describe_histogram!(
        "commands_duration_seconds",
        Unit::Seconds,
        "Time spent handling a command, middleware included"
    );
}

impl Middleware for MetricsMiddleware {
    fn intercept(&self, next: CmdHandlerFn) -> CmdHandlerFn {
        handler(move |ctx, entity_id, command| {
            let next = Arc::clone(&next);

            Box::pin(async move {
                let name = command.name().to_string();
                let start = Instant::now();

                let result = next(ctx, entity_id, command).await;

                let outcome = if result.is_ok() { "ok" } else { "error" };
                counter!("commands_dispatched_total", "command" => name.clone(), "outcome" => outcome)
                    .increment(1);
                histogram!("commands_duration_seconds", "command" => name)
                    .record(start.elapsed().as_secs_f64());

                result
            })
        })
    }
}
