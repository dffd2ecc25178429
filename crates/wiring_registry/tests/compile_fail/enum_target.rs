use wiring_registry::Inject;

/// Enums have no fields to populate.
#[derive(Inject)]
enum Mode {
    Fast,
    Slow,
}

fn main() {
    let _ = [Mode::Fast, Mode::Slow];
}
