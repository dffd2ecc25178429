use wiring_registry::Inject;

/// Unions cannot be populated field by field.
#[derive(Inject)]
union Bits {
    word: u32,
    bytes: [u8; 4],
}

fn main() {
    let bits = Bits { word: 1 };
    let _ = unsafe { (bits.word, bits.bytes) };
}
