use wiring_registry::Inject;

/// Each field takes one binding.
#[derive(Inject)]
struct Twice {
    #[inject("first")]
    #[inject("other")]
    value: u8,
}

fn main() {
    let twice = Twice { value: 1 };
    let _ = twice.value;
}
