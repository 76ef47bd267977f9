use es_domain::AsAny;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// 命令（Command）
///
/// 表达“意图”的写操作请求，寻址到单个实体。
/// - `name` 返回命令的稳定名称，作为分发表的路由键，不可为空；
/// - 同一名称在一个分发器内只能绑定一种具体命令类型；
/// - 建议保持语义化的“动宾结构”命名，如 `OpenAccount`、`Deposit`。
///
/// 通常通过 `#[derive(Command)]` 实现，可用 `#[command(name = "...")]` 指定名称。
pub trait Command: AsAny + Sync {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    fn name(&self) -> &str;
}

/// 在失败边界内求取命令名，将 panic 转换为错误信息
pub(crate) fn resolve_name<F>(f: F) -> Result<String, String>
where
    F: FnOnce() -> String,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
