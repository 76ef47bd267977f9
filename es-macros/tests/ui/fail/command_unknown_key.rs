use es_macros::Command;

#[derive(Command)]
#[command(label = "open")]
struct OpenAccount;

fn main() {
    let _ = OpenAccount;
}
