//! Single-name retrieval through `Registry::get`.

use std::sync::{Arc, OnceLock};

use wiring_registry::{InjectError, Registry};

trait Greeter: Send + Sync {
    fn greet(&self, who: &str) -> String;
}

trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
struct English {
    excited: bool,
}

impl Greeter for English {
    fn greet(&self, who: &str) -> String {
        if self.excited {
            format!("Hello, {who}!")
        } else {
            format!("Hello, {who}.")
        }
    }
}

fn registry() -> Registry {
    let registry = Registry::new();
    registry
        .register("greeter", English { excited: true })
        .implements::<English, dyn Greeter>(|v| v);
    registry
}

#[test]
fn exact_type_receives_the_stored_value() {
    let value = Arc::new(English { excited: false });
    let registry = Registry::new();
    registry.register_arc("greeter", Arc::clone(&value));

    let mut dest: Option<Arc<English>> = None;
    registry.get("greeter", &mut dest).unwrap();

    assert!(Arc::ptr_eq(&dest.unwrap(), &value));
}

#[test]
fn declared_interface_receives_the_value() {
    let registry = registry();

    let mut dest: Option<Arc<dyn Greeter>> = None;
    registry.get("greeter", &mut dest).unwrap();

    assert_eq!(dest.unwrap().greet("Ada"), "Hello, Ada!");
}

#[test]
fn undeclared_interface_is_a_mismatch_and_leaves_dest_untouched() {
    struct Polite;
    impl Farewell for Polite {
        fn bye(&self) -> String {
            "goodbye".into()
        }
    }

    let registry = registry();
    let before: Arc<dyn Farewell> = Arc::new(Polite);
    let mut dest = Some(Arc::clone(&before));

    let err = registry.get("greeter", &mut dest).unwrap_err();

    match err {
        InjectError::TypeMismatch {
            name,
            expected,
            found,
        } => {
            assert_eq!(name, "greeter");
            assert!(expected.contains("Farewell"));
            assert!(found.contains("English"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(Arc::ptr_eq(dest.as_ref().unwrap(), &before));
}

#[test]
fn wrong_concrete_type_is_a_mismatch() {
    let registry = registry();

    let mut dest: Option<Arc<String>> = None;
    let err = registry.get("greeter", &mut dest).unwrap_err();

    assert!(matches!(err, InjectError::TypeMismatch { .. }));
    assert!(dest.is_none());
}

#[test]
fn unknown_name_is_reported() {
    let registry = registry();

    let mut dest: Option<Arc<dyn Greeter>> = None;
    let err = registry.get("nope", &mut dest).unwrap_err();

    assert!(matches!(err, InjectError::UnknownDependency { ref name } if name == "nope"));
    assert!(dest.is_none());
}

#[test]
fn empty_once_lock_is_filled() {
    let registry = registry();

    let mut dest: OnceLock<Arc<dyn Greeter>> = OnceLock::new();
    registry.get("greeter", &mut dest).unwrap();

    assert_eq!(dest.get().unwrap().greet("Bo"), "Hello, Bo!");
}

#[test]
fn filled_once_lock_is_an_invalid_destination() {
    let registry = registry();
    let existing = Arc::new(English { excited: false });

    let dest: OnceLock<Arc<English>> = OnceLock::new();
    let _ = dest.set(Arc::clone(&existing));
    let mut dest = dest;

    let err = registry.get("greeter", &mut dest).unwrap_err();

    assert!(matches!(err, InjectError::InvalidDestination { .. }));
    assert!(Arc::ptr_eq(dest.get().unwrap(), &existing));
}

#[test]
fn invalid_destination_wins_over_unknown_name() {
    let registry = Registry::new();

    let dest: OnceLock<Arc<u8>> = OnceLock::new();
    let _ = dest.set(Arc::new(1));
    let mut dest = dest;

    let err = registry.get("missing", &mut dest).unwrap_err();
    assert!(matches!(err, InjectError::InvalidDestination { .. }));
}

#[test]
fn get_overwrites_an_existing_option() {
    let registry = registry();

    let mut dest = Some(Arc::new(English { excited: false }));
    registry.get("greeter", &mut dest).unwrap();

    assert!(dest.unwrap().excited);
}

#[test]
fn resolve_as_and_get_cloned() {
    let registry = registry();

    let greeter = registry.resolve_as::<dyn Greeter>("greeter").unwrap();
    assert_eq!(greeter.greet("Cy"), "Hello, Cy!");

    let copy: English = registry.get_cloned("greeter").unwrap();
    assert_eq!(copy, English { excited: true });

    assert!(matches!(
        registry.get_cloned::<u64>("greeter"),
        Err(InjectError::TypeMismatch { .. })
    ));
}

#[test]
fn re_registering_replaces_the_value() {
    let registry = registry();
    registry.register("greeter", English { excited: false });

    let greeter = registry.resolve_as::<dyn Greeter>("greeter").unwrap();
    assert_eq!(greeter.greet("Di"), "Hello, Di.");
}

#[test]
fn error_messages_name_the_binding() {
    let registry = registry();
    let err = registry.resolve_as::<u8>("missing").unwrap_err();

    assert_eq!(err.to_string(), "dependency `missing` is not registered");
}
