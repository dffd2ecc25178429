use std::sync::Arc;

use wiring_registry::{Inject, Registry};

#[derive(Inject)]
struct Holder<'a, T: ?Sized + 'static>
where
    T: Send + Sync,
{
    #[inject]
    value: Option<Arc<T>>,
    label: &'a str,
}

fn main() {
    let registry = Registry::new();
    registry.register("value", 3_i64);

    let mut holder: Holder<'_, i64> = Holder {
        value: None,
        label: "n",
    };
    registry.apply(&mut holder).unwrap();
    assert_eq!(holder.value.as_deref(), Some(&3));
    assert_eq!(holder.label, "n");
}
