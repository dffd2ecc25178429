use std::sync::{Arc, OnceLock};

use wiring_registry::resolve::Manifest;
use wiring_registry::{Inject, Registry};

trait Clock: Send + Sync {}

#[derive(Default, Inject)]
struct Forms {
    #[inject("positional")]
    positional: Option<Arc<u8>>,
    #[inject(name = "named")]
    named: OnceLock<Arc<dyn Clock>>,
    #[inject]
    bare: Option<Arc<String>>,
    skipped: Vec<u8>,
}

fn main() {
    let mut forms = Forms::default();
    let Manifest::Record { fields, .. } = Inject::manifest(&mut forms) else {
        unreachable!();
    };
    assert_eq!(fields.len(), 4);

    let registry = Registry::new();
    assert!(registry.apply(&mut forms).is_err());
}
