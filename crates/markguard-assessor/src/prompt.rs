//! LLM prompt for trademark conflict assessment

use markguard_domain::{Field, Record, TargetTrademark, SHIELD_TARGET};

/// Placeholder printed for a field the record does not carry
pub const MISSING_VALUE: &str = "N/A";

/// Builds the assessment prompt for one record
pub struct PromptBuilder<'a> {
    record: &'a Record,
    target: &'a TargetTrademark,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder comparing `record` with the SHIELD application
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            target: &SHIELD_TARGET,
        }
    }

    /// Compare against a different target application
    pub fn with_target(mut self, target: &'a TargetTrademark) -> Self {
        self.target = target;
        self
    }

    /// Build the complete assessment prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(TASK_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("**Trademark Record**:\n");
        prompt.push_str(&self.record_block());
        prompt.push('\n');

        prompt.push_str("Target trademark that is going to be filed:\n");
        prompt.push_str(&self.target_block());
        prompt.push('\n');

        prompt.push_str(RULES);
        prompt.push_str("\n\n");
        prompt.push_str(GRADING_POLICY);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_REQUIREMENTS);

        prompt
    }

    /// Headed by the record's own Register Mark rather than the target's name.
    fn record_block(&self) -> String {
        let value = |field: Field| self.record.get(field).unwrap_or(MISSING_VALUE);
        let mut block = format!("Trademark registered: {}\n", value(Field::RegisterMark));
        for (label, field) in RECORD_LABELS {
            block.push_str(&format!("{}: {}\n", label, value(field)));
        }
        block
    }

    fn target_block(&self) -> String {
        let t = self.target;
        [
            ("Trademark registered", t.name),
            ("Application Number", t.application_number),
            ("Goods and Services", t.goods_and_services),
            ("Owner", t.owner),
            ("Applicant", t.applicant),
            ("Register Mark", t.register_mark),
            ("Class", t.class),
            ("Application Date", t.application_date),
            ("Status", t.status),
            ("Publication Date", t.publication_date),
        ]
        .iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
    }
}

const RECORD_LABELS: [(&str, Field); Field::COUNT] = [
    ("Application Number", Field::ApplicationNumber),
    ("Goods and Services", Field::GoodsAndServices),
    ("Owner", Field::Owner),
    ("Applicant", Field::Applicant),
    ("Register Mark", Field::RegisterMark),
    ("Class", Field::Class),
    ("Application Date", Field::ApplicationDate),
    ("Status", Field::Status),
    ("Publication Date", Field::PublicationDate),
];

const TASK_INSTRUCTIONS: &str = "You are tasked to assess the conflict level between a trademark record \
and a target trademark that is newly going to be filed, based on the condition rules provided.";

const RULES: &str = r#"**Rules**:
Condition 1: Trademark Name Comparison
- Condition 1A: The existing trademark's name is a character-for-character match with the proposed trademark name.
- Condition 1B: The existing trademark's name is semantically equivalent to the proposed trademark name.
- Condition 1C: The existing trademark's name is phonetically equivalent to the proposed trademark name.
- Condition 1D: If both the existing trademark's name and the proposed trademark name consist of multiple words, then the first two or more words of the existing trademark's name must be phonetically equivalent to the proposed trademark name.
- Condition 1E: Primary Position Requirement. The primary position of a trademark is the first word or phrase element of a multi-word trademark. For a conflict to exist under Condition 1E, the proposed trademark name must be in the primary position of the existing trademark, i.e. it must be the first word of the existing trademark.
  Example:
    Existing Trademark: "STORIES AND JOURNEYS"
    Proposed Trademark: "JOURNEY"
    Analysis: The first word/phrase of "STORIES AND JOURNEYS" is "STORIES", not "JOURNEY". Therefore "JOURNEY" does not meet Condition 1E because it is not in the primary position of the existing trademark.
  Example:
    Existing Trademark: "JOURNEY BY COMPANION"
    Proposed Trademark: "JOURNEY"
    Analysis: The first word/phrase of "JOURNEY BY COMPANION" is "JOURNEY". Therefore "JOURNEY" does meet Condition 1E because it is in the primary position of the existing trademark.

Condition 3: Target Market and Products
- Condition 3A: The existing trademark's goods/services target the exact same products as the proposed trademark.
- Condition 3B: The existing trademark's goods/services target an exact market as the proposed trademark."#;

const GRADING_POLICY: &str = r#"If the existing trademark in the given input satisfies:
- Special case: If the existing trademark Status is Cancelled or Abandoned, it is automatically considered conflict grade Low, but still give the reasoning for the potential conflicts.
- If the existing trademark satisfies Condition 1A, 1B, 1C, or 1D, and also satisfies the revised Condition 1E (when applicable), along with Condition 2, and both Condition 3A (needed to be fully satisfied) and 3B (needed to be fully satisfied), then the conflict grade should be High.
- If the existing trademark satisfies any two of the following: Condition 1A, 1B, 1C, or 1D (with the revised Condition 1E being a necessary component for these to be considered satisfied when applicable), Condition 2, Condition 3A (needed to be fully satisfied) and 3B (needed to be fully satisfied), then the conflict grade should be Moderate.
- If the existing trademark satisfies only one (or none) of the conditions: Condition 1A, 1B, 1C, 1D (only if the revised Condition 1E is also satisfied when applicable), Condition 2, Condition 3A and 3B, then the conflict grade should be Low."#;

const OUTPUT_REQUIREMENTS: &str = r#"Determine:
1. Conflict Level: Low, Moderate, or High.
2. Rule Codes: Give the codes of the rule conditions that are satisfied.
3. Reasoning: Provide a detailed reasoning for your assessment of why each condition given above is satisfied (give reasoning only for those which are satisfied; do not discuss unsatisfied conditions)."#;

#[cfg(test)]
mod tests {
    use super::*;

    fn cancelled_record() -> Record {
        Record::default()
            .with(Field::ApplicationNumber, "77001")
            .with(Field::RegisterMark, "SHIELD PRO")
            .with(Field::Class, "9")
            .with(Field::Status, "Cancelled")
    }

    #[test]
    fn test_prompt_includes_record_values() {
        let prompt = PromptBuilder::new(&cancelled_record()).build();
        assert!(prompt.contains("Application Number: 77001"));
        assert!(prompt.contains("Trademark registered: SHIELD PRO"));
        assert!(prompt.contains("Status: Cancelled"));
    }

    #[test]
    fn test_absent_fields_are_marked() {
        let prompt = PromptBuilder::new(&cancelled_record()).build();
        assert!(prompt.contains("Owner: N/A"));
        assert!(prompt.contains("Publication Date: N/A"));
    }

    #[test]
    fn test_prompt_includes_target() {
        let prompt = PromptBuilder::new(&Record::default()).build();
        assert!(prompt.contains("Application Number: 983489723"));
        assert!(prompt.contains("Goods and Services: Software security over cloud based applications"));
        assert!(prompt.contains("Status: Under creation"));
    }

    #[test]
    fn test_prompt_includes_taxonomy_and_grading() {
        let prompt = PromptBuilder::new(&cancelled_record()).build();
        for code in ["1A", "1B", "1C", "1D", "1E", "3A", "3B"] {
            assert!(prompt.contains(&format!("Condition {}:", code)), "missing {}", code);
        }
        assert!(prompt.contains("Status is Cancelled or Abandoned"));
        assert!(prompt.contains("conflict grade should be High"));
        assert!(prompt.contains("conflict grade should be Moderate"));
        assert!(prompt.contains("1. Conflict Level: Low, Moderate, or High."));
    }

    #[test]
    fn test_record_block_precedes_target_block() {
        let prompt = PromptBuilder::new(&cancelled_record()).build();
        let record_at = prompt.find("**Trademark Record**").unwrap();
        let target_at = prompt.find("Target trademark that is going to be filed").unwrap();
        let rules_at = prompt.find("**Rules**").unwrap();
        assert!(record_at < target_at && target_at < rules_at);
    }

    #[test]
    fn test_custom_target() {
        let target = TargetTrademark {
            name: "AEGIS",
            ..SHIELD_TARGET
        };
        let record = Record::default();
        let prompt = PromptBuilder::new(&record).with_target(&target).build();
        assert!(prompt.contains("Trademark registered: AEGIS"));
    }
}
