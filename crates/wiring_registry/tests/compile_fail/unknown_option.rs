use wiring_registry::Inject;

/// Only `name` is accepted inside the attribute.
#[derive(Inject)]
struct Options {
    #[inject(foo = "x")]
    value: u8,
}

fn main() {
    let options = Options { value: 1 };
    let _ = options.value;
}
