pub struct MemoryScope;

impl MemoryScope {
    pub const PREPROCESS: &'static str = "preprocess";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const KNOWLEDGE_SUMMARY: &'static str = "knowledge_summary";
    pub const STUDENT_PROFILE: &'static str = "student_profile";
}
