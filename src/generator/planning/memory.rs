pub struct MemoryScope;

impl MemoryScope {
    pub const PLANNING: &'static str = "planning";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const BLUEPRINT: &'static str = "blueprint";
}
