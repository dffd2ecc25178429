use wiring_registry::Inject;

/// A binding needs a name to look up.
#[derive(Inject)]
struct Blank {
    #[inject("")]
    value: u8,
}

fn main() {
    let blank = Blank { value: 1 };
    let _ = blank.value;
}
