use wiring_registry::Inject;

/// Positional fields have no name to bind.
#[derive(Inject)]
struct Pair(u8);

fn main() {
    let pair = Pair(1);
    let _ = pair.0;
}
