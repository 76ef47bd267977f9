use es_macros::Command;

#[derive(Command)]
#[command(name = "")]
struct OpenAccount;

fn main() {
    let _ = OpenAccount;
}
