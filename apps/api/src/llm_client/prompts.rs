// Cross-cutting prompt fragments.
// Each pipeline stage that calls the model defines its own prompts alongside it.

/// Instruction that keeps the model inside the retrieved catalog documents.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Recommend ONLY assessments that appear in the context below, \
    using the exact value of their 'Assessment Name' line. \
    DO NOT ASSUME ANY TEST FROM YOUR KNOWLEDGE BASE. \
    If no assessment in the context fits, return an empty JSON array.";
