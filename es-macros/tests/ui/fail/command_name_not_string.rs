use es_macros::Command;

#[derive(Command)]
#[command(name = 42)]
struct OpenAccount;

fn main() {
    let _ = OpenAccount;
}
