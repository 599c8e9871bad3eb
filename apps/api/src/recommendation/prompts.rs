// All LLM prompt constants for the recommendation pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for assessment selection.
pub const RECOMMEND_SYSTEM: &str = "You are an SHL Assessment Assistant. \
    You select assessments for a hiring profile from a provided list of catalog entries. \
    You MUST respond with a valid JSON array only. \
    Do NOT include explanations or apologies.";

/// Recommendation prompt template.
/// Replace: {grounding_instruction}, {context}, {top_k}, {query}
pub const RECOMMEND_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

CONTEXT (catalog entries, the ONLY assessments you may recommend):
{context}

Give the top {top_k} tests from the context that are best suited for the following profile:
{query}

RULES:
1. DO NOT ASSUME ANY TEST FROM YOUR KNOWLEDGE BASE
2. GIVE OUTPUT IN THE FORMAT BELOW ONLY
3. YOU MAY GIVE A COMBINATION OF TESTS IN ONE ENTRY IF THE USER SPECIFIES A DURATION
4. DO NOT GENERATE MORE THAN {top_k} SUGGESTIONS

Return a JSON array like:
[
  {
    "Exam Name": ["Java Platform Enterprise Edition 7 (Java EE 7)"],
    "Duration": ["30 minutes"]
  }
]

"Exam Name" and "Duration" are parallel lists: the i-th duration belongs to the i-th exam."#;

/// System prompt for isolating a job description from a scraped page.
pub const JD_EXTRACT_SYSTEM: &str = "You extract job descriptions from web page text. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object.";

/// Job description extraction prompt template. Replace `{page_text}` before sending.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"You are given the content of a web page that may contain a job description.
Extract ONLY the responsibilities and requirements of the candidate.
DO NOT extract any other information (company background, benefits, navigation, legal text).

Web page content:
"""
{page_text}
"""

Return a JSON object with exactly one key:
{"Extracted Job Description": "<responsibilities and requirements>"}"#;
