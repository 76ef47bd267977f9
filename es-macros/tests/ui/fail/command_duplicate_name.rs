use es_macros::Command;

#[derive(Command)]
#[command(name = "a", name = "b")]
struct OpenAccount;

fn main() {
    let _ = OpenAccount;
}
