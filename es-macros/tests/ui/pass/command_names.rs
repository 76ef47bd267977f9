use es_commands::Command;

#[derive(Command)]
struct OpenAccount;

#[derive(Command)]
#[command(name = "account.close")]
struct CloseAccount {
    reason: String,
}

#[derive(Command)]
struct Envelope<T: Send + Sync + 'static> {
    inner: T,
}

fn main() {
    assert_eq!(OpenAccount.name(), "OpenAccount");

    let close = CloseAccount {
        reason: "moved".to_string(),
    };
    assert_eq!(close.name(), "account.close");
    assert_eq!(close.reason, "moved");

    let envelope = Envelope { inner: 1u8 };
    assert_eq!(envelope.name(), "Envelope");
    assert_eq!(envelope.inner, 1);
}
