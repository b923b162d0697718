pub struct MemoryScope;

impl MemoryScope {
    pub const COMPOSE: &'static str = "compose";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const TASKS: &'static str = "scatter_tasks";
    pub const QUESTIONS: &'static str = "questions";
}
