use async_trait::async_trait;
use es_commands::{
    Command, CommandError, CommandResult, Dispatcher, Executor, LoggingMiddleware, Middleware,
    metrics, validator_for,
};
use es_domain::{
    BusinessContext, Content, DomainError, DomainResult, EventHandler, Events, ExecutionContext,
    InMemoryStore, RecordedEvent,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Command)]
#[command(name = "account.open")]
struct OpenAccount {
    initial_balance: i64,
}

#[derive(Debug, Default, Command)]
#[command(name = "account.deposit")]
struct Deposit {
    amount: i64,
}

#[derive(Debug, Default, Command)]
#[command(name = "account.withdraw")]
struct Withdraw {
    amount: i64,
}

#[derive(Debug, Content)]
#[content(name = "account.opened")]
struct Opened {
    initial_balance: i64,
}

#[derive(Debug, Content)]
#[content(name = "account.deposited")]
struct Deposited {
    amount: i64,
}

#[derive(Debug, Content)]
#[content(name = "account.withdrawn")]
struct Withdrawn {
    amount: i64,
}

#[derive(Debug, Default)]
struct Account {
    opened: bool,
    balance: i64,
}

impl EventHandler for Account {
    fn handle(&mut self, event: &RecordedEvent) -> DomainResult<()> {
        if event.event_name() != "account.opened" && !self.opened {
            return Err(DomainError::InvalidState {
                reason: format!("{} before account.opened", event.event_name()),
            });
        }

        match event.event_name() {
            "account.opened" => {
                self.opened = true;
                self.balance = event.try_content_as::<Opened>()?.initial_balance;
            }
            "account.deposited" => self.balance += event.try_content_as::<Deposited>()?.amount,
            "account.withdrawn" => self.balance -= event.try_content_as::<Withdrawn>()?.amount,
            other => {
                return Err(DomainError::InvalidState {
                    reason: format!("unknown event {other}"),
                });
            }
        }

        Ok(())
    }
}

struct WithdrawExecutor;

#[async_trait]
impl Executor<Withdraw, Account> for WithdrawExecutor {
    async fn execute(
        &self,
        _ctx: &ExecutionContext,
        cmd: Withdraw,
        state: &Account,
    ) -> CommandResult<Events> {
        if !state.opened {
            return Err(CommandError::Rejected("account not opened".into()));
        }
        if state.balance < cmd.amount {
            return Err(CommandError::Rejected("insufficient funds".into()));
        }

        Ok(vec![Box::new(Withdrawn { amount: cmd.amount })])
    }
}

fn positive(amount: i64) -> CommandResult<()> {
    if amount <= 0 {
        return Err(CommandError::Validation("amount must be positive".into()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,es_commands=debug")),
        )
        .init();

    es_commands::middleware::describe_metrics();

    let store = InMemoryStore::new();
    let middlewares: Vec<Arc<dyn Middleware>> = vec![
        Arc::new(
            LoggingMiddleware::builder()
                .slow_threshold(Duration::from_millis(50))
                .build(),
        ),
        Arc::new(metrics()),
        Arc::new(validator_for::<Deposit, _>(|_ctx, cmd| positive(cmd.amount))),
        Arc::new(validator_for::<Withdraw, _>(|_ctx, cmd| positive(cmd.amount))),
    ];
    let dispatcher = Dispatcher::with_middlewares(Arc::new(store.clone()), middlewares);

    dispatcher.register_fn::<OpenAccount, Account, _>("account", |_ctx, cmd, state| {
        if state.opened {
            return Err(CommandError::Rejected("account already opened".into()));
        }
        Ok(vec![Box::new(Opened {
            initial_balance: cmd.initial_balance,
        })])
    })?;
    dispatcher.register_fn::<Deposit, Account, _>("account", |_ctx, cmd, state| {
        if !state.opened {
            return Err(CommandError::Rejected("account not opened".into()));
        }
        Ok(vec![Box::new(Deposited { amount: cmd.amount })])
    })?;
    dispatcher.register::<Withdraw, Account, _>("account", WithdrawExecutor)?;

    tracing::info!(commands = ?dispatcher.registered_commands(), "dispatcher ready");

    let ctx = ExecutionContext::with_business(
        BusinessContext::builder()
            .correlation_id("demo-1".into())
            .actor_type("user".into())
            .actor_id("alice".into())
            .build(),
    );

    dispatcher
        .dispatch(&ctx, "acc-1", OpenAccount { initial_balance: 100 })
        .await?;
    dispatcher.dispatch(&ctx, "acc-1", Deposit { amount: 50 }).await?;
    dispatcher.dispatch(&ctx, "acc-1", Withdraw { amount: 30 }).await?;

    if let Err(err) = dispatcher.dispatch(&ctx, "acc-1", Withdraw { amount: 500 }).await {
        tracing::warn!(error = %err, "withdraw rejected");
    }
    if let Err(err) = dispatcher.dispatch(&ctx, "acc-1", Deposit { amount: -5 }).await {
        tracing::warn!(error = %err, "deposit rejected");
    }

    let mut account = Account::default();
    for event in store.events("account", "acc-1").await {
        account.handle(&event)?;
        tracing::info!(
            number = event.event_number(),
            name = event.event_name(),
            correlation_id = event.correlation_id(),
            "recorded"
        );
    }

    println!("acc-1 balance: {}", account.balance);

    Ok(())
}
