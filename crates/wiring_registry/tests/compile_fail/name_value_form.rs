use wiring_registry::Inject;

/// The attribute does not take `= value` directly.
#[derive(Inject)]
struct Assigned {
    #[inject = "x"]
    value: u8,
}

fn main() {
    let assigned = Assigned { value: 1 };
    let _ = assigned.value;
}
