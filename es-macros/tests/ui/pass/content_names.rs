use es_domain::Content;

#[derive(Debug, Content)]
struct Opened;

#[derive(Debug, Content)]
#[content(name = "account.deposited")]
struct Deposited {
    amount: u64,
}

fn main() {
    assert_eq!(Opened.event_name(), "Opened");

    let deposited = Deposited { amount: 10 };
    assert_eq!(deposited.event_name(), "account.deposited");
    assert_eq!(deposited.amount, 10);
}
