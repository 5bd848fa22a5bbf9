use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::types::ClauseRequest;

const SYSTEM_PROMPT: &str = include_str!("../prompts/system.txt");
const FEW_SHOT_EXAMPLE: &str = include_str!("../prompts/few_shot.txt");

const GENERIC_GUIDANCE: &str =
    "Apply general commercial contract principles and industry best practices.";

/// Industries with dedicated review guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Industry {
    Technology,
    Construction,
    Healthcare,
    Retail,
    Finance,
    RealEstate,
}

impl Industry {
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Technology => {
                "Consider IP ownership, data protection, SLA terms, and software licensing risks."
            }
            Self::Construction => {
                "Focus on delay penalties, variation procedures, defects liability, and payment terms."
            }
            Self::Healthcare => {
                "Emphasize patient data privacy, malpractice liability, and regulatory compliance."
            }
            Self::Retail => {
                "Review inventory risk, return policies, supplier terms, and consumer protection."
            }
            Self::Finance => {
                "Analyze regulatory compliance, fiduciary duties, and financial exposure limits."
            }
            Self::RealEstate => {
                "Check title issues, maintenance obligations, rent escalation, and termination rights."
            }
        }
    }
}

/// Guidance sentence for any industry tag. Unknown tags get generic guidance.
pub fn industry_guidance(tag: &str) -> &'static str {
    Industry::from_str(tag)
        .map(Industry::guidance)
        .unwrap_or(GENERIC_GUIDANCE)
}

/// Build the system prompt sent with every analysis.
pub fn build_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Build the user prompt for analysing a single clause.
pub fn build_analysis_prompt(request: &ClauseRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("Analyze this contract clause:\n\n");
    prompt.push_str(&request.clause);

    if let Some(context) = request.context() {
        prompt.push_str(&format!("\n\nAdditional context: {context}"));
    }

    if let Some(industry) = request.industry() {
        prompt.push_str(&format!(
            "\n\nIndustry context ({industry}): {}",
            industry_guidance(industry)
        ));
    }

    prompt.push_str("\n\n");
    prompt.push_str(FEW_SHOT_EXAMPLE);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const CLAUSE: &str = "The Contractor shall be liable for all damages without limitation.";

    #[test]
    fn test_system_prompt_demands_json() {
        let system = build_system_prompt();
        assert!(system.contains("ContractRiskAI"));
        assert!(system.contains("\"arabic\""));
        assert!(system.contains("مرتفع"));
    }

    #[test]
    fn test_prompt_starts_with_clause() {
        let prompt = build_analysis_prompt(&ClauseRequest::new(CLAUSE));
        assert!(prompt.starts_with(&format!("Analyze this contract clause:\n\n{CLAUSE}")));
        assert!(!prompt.contains("Additional context"));
        assert!(!prompt.contains("Industry context"));
        assert!(prompt.ends_with(
            "respond ONLY with a JSON object following this exact format."
        ));
    }

    #[test]
    fn test_clause_is_not_escaped() {
        let clause = "Party \"A\" shall {not} <assign> rights.\nSecond line.";
        let prompt = build_analysis_prompt(&ClauseRequest::new(clause));
        assert!(prompt.contains(clause));
    }

    #[test]
    fn test_prompt_includes_context_and_industry() {
        let request = ClauseRequest::new(CLAUSE)
            .with_context("Subcontract for a hospital build")
            .with_industry("Construction");
        let prompt = build_analysis_prompt(&request);
        assert!(prompt.contains("\n\nAdditional context: Subcontract for a hospital build"));
        assert!(prompt.contains(
            "Industry context (Construction): Focus on delay penalties, variation procedures, \
             defects liability, and payment terms."
        ));
        let context_at = prompt.find("Additional context").expect("context");
        let industry_at = prompt.find("Industry context").expect("industry");
        let example_at = prompt.find("Examples of expected output").expect("example");
        assert!(context_at < industry_at && industry_at < example_at);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = ClauseRequest::new(CLAUSE)
            .with_context("Master services agreement")
            .with_industry("technology");
        let first = build_analysis_prompt(&request);
        for _ in 0..5 {
            assert_eq!(build_analysis_prompt(&request), first);
        }
    }

    #[test]
    fn test_industry_lookup_is_case_insensitive() {
        for industry in Industry::iter() {
            let tag: &'static str = industry.into();
            assert_eq!(industry_guidance(tag), industry.guidance());
            assert_eq!(industry_guidance(&tag.to_uppercase()), industry.guidance());
        }
        assert_eq!(
            industry_guidance("Real_Estate"),
            Industry::RealEstate.guidance()
        );
    }

    #[test]
    fn test_industry_lookup_is_total() {
        for tag in ["", "aerospace", "real estate", " technology", "tech", "日本"] {
            let guidance = industry_guidance(tag);
            assert!(!guidance.is_empty());
            assert_eq!(guidance, GENERIC_GUIDANCE, "tag {tag:?}");
        }
    }
}
