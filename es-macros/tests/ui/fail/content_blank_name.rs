use es_macros::Content;

#[derive(Debug, Content)]
#[content(name = "  ")]
struct Opened;

fn main() {
    let _ = Opened;
}
