//! Recommendation selector
//!
//! Maps a (dimension, percentage) pair to a fixed list of advice strings via
//! three score bands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score band used to pick recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// score < 40
    Low,
    /// 40 <= score < 70
    Medium,
    /// score >= 70
    High,
}

impl ScoreBand {
    /// Lower bound of the medium band (inclusive)
    pub const MEDIUM_FROM: i64 = 40;
    /// Lower bound of the high band (inclusive)
    pub const HIGH_FROM: i64 = 70;

    pub fn from_score(score: i64) -> Self {
        if score < Self::MEDIUM_FROM {
            ScoreBand::Low
        } else if score < Self::HIGH_FROM {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for any dimension id the table does not know
pub const GENERIC_RECOMMENDATIONS: [&str; 6] = [
    "Work on improving this dimension by integrating \"Amp It Up\" and \"The Geek Way\" principles",
    "Raise expectations by setting higher standards and promoting rapid experimentation",
    "Increase urgency by accelerating decision-making and implementing rapid iteration cycles",
    "Intensify commitment by focusing on outcomes and cost-effective innovation",
    "Transform conversations by promoting intellectually intense discussions that challenge established practices",
    "Develop data-driven leadership that uses evidence and technology to guide decisions",
];

/// Advice for a dimension at a given percentage
///
/// Unknown dimensions get [`GENERIC_RECOMMENDATIONS`] whatever the score.
pub fn get_recommendations(dimension_id: &str, score: i64) -> &'static [&'static str] {
    let band = ScoreBand::from_score(score);
    recommendations_for(dimension_id, band).unwrap_or(&GENERIC_RECOMMENDATIONS)
}

/// Table lookup for one (dimension, band) cell
pub fn recommendations_for(dimension_id: &str, band: ScoreBand) -> Option<&'static [&'static str]> {
    use ScoreBand::*;

    let cell: &'static [&'static str] = match (dimension_id, band) {
        ("raising_expectations", Low) => &[
            "Set clear, ambitious goals that challenge your team to exceed their limits",
            "Create an environment where rapid experimentation and challenging the status quo is encouraged",
            "Implement regular performance reviews that focus on raising standards and learning from experiments",
            "Balance high standards with recognition of progress and productive failures",
        ],
        ("raising_expectations", Medium) => &[
            "Calibrate your expectations to be challenging while encouraging experimentation",
            "Develop a system to recognize both achievement of standards and innovative approaches",
            "Involve the team in setting higher standards and defining excellence",
            "Create mechanisms to learn from high performance and rapid experimentation",
        ],
        ("raising_expectations", High) => &[
            "Create a culture where continuously raising expectations and experimentation is the norm",
            "Develop other leaders to set high standards while promoting rapid prototyping",
            "Implement mechanisms to regularly review and raise performance standards",
            "Share best practices for excellence and experimentation across teams",
        ],
        ("increasing_urgency", Low) => &[
            "Implement rapid decision-making processes and iteration cycles that accelerate execution",
            "Eliminate bureaucratic obstacles that slow progress and innovation",
            "Create shorter feedback loops to drive immediate improvement and learning",
            "Design clear priorities that focus energy on what matters most for speed",
        ],
        ("increasing_urgency", Medium) => &[
            "Develop a system for prioritizing urgent tasks and accelerating iteration cycles",
            "Speed up feedback loops to quickly adjust execution and innovation",
            "Balance execution speed with quality of results and learning",
            "Create agile decision-making frameworks that empower teams to move faster",
        ],
        ("increasing_urgency", High) => &[
            "Create mechanisms to identify and resolve bottlenecks in execution and innovation cycles",
            "Develop team capability for rapid decision-making and immediate implementation",
            "Implement a system to measure and continuously improve execution speed",
            "Build a culture that values speed and iteration as competitive advantages",
        ],
        ("intensifying_commitment", Low) => &[
            "Connect daily work to meaningful purposes and cost-effective innovation",
            "Generate higher energy levels through inspiring goals and visible progress",
            "Develop team rituals that maintain intensity and focus on outcomes while optimizing resources",
            "Create a sense of urgency around key priorities and efficient innovation",
        ],
        ("intensifying_commitment", Medium) => &[
            "Foster a sense of ownership for outcomes and resource-efficient solutions",
            "Implement mechanisms to maintain determination while pursuing cost-effective innovation",
            "Recognize and celebrate both commitment to goals and innovative resource utilization",
            "Develop strategies to maintain commitment while optimizing resources",
        ],
        ("intensifying_commitment", High) => &[
            "Create a culture where intensity, outcome focus, and cost-effective innovation are core values",
            "Develop leaders who model high levels of commitment and resource efficiency",
            "Implement practices to prevent burnout while maintaining intensity and innovation",
            "Build systems for sustained commitment and continuous improvement with optimal resources",
        ],
        ("transforming_conversations", Low) => &[
            "Implement Socratic questioning techniques that challenge established practices",
            "Foster constructive debates that rigorously test ideas and question assumptions",
            "Create a safe environment where challenging ideas and norms is encouraged",
            "Establish frameworks that promote intellectually intense collaboration and questioning",
        ],
        ("transforming_conversations", Medium) => &[
            "Develop the ability to ask probing questions that challenge assumptions and established practices",
            "Implement structures for intellectually intense collaboration that questions the status quo",
            "Train the team in constructive debate and rigorous testing of ideas and norms",
            "Create collaborative spaces that encourage meaningful dialogue and questioning assumptions",
        ],
        ("transforming_conversations", High) => &[
            "Create a culture where transformative conversations and challenging norms are the norm",
            "Develop facilitators who can elevate dialogue quality and intellectual rigor",
            "Implement practices to convert deep conversations into concrete actions that challenge norms",
            "Build communication approaches that balance respect with intellectual challenge",
        ],
        ("data_driven_leadership", Low) => &[
            "Establish clear metrics to measure progress and effectively leverage technology",
            "Implement data dashboards that inform decisions and technology adoption",
            "Develop the ability to interpret data and extract actionable insights",
            "Use data and commercial technology to guide decision-making and innovation",
        ],
        ("data_driven_leadership", Medium) => &[
            "Foster a culture where decisions are evidence-based and technology is effectively leveraged",
            "Implement processes to collect and analyze relevant data for decision-making",
            "Develop the ability to identify patterns in data that can inform technology adoption",
            "Create data-sharing protocols that support decision-making and innovation",
        ],
        ("data_driven_leadership", High) => &[
            "Create advanced data analytics systems that inform strategy and technology adoption",
            "Develop the ability to use data to anticipate changes and innovation opportunities",
            "Implement practices that balance data-driven decisions with judgment when adopting technology",
            "Build data-informed innovation processes that effectively leverage commercial technology",
        ],
        _ => return None,
    };

    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(69), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(100), ScoreBand::High);
    }

    #[test]
    fn test_selects_band_cell() {
        let low = get_recommendations("increasing_urgency", 39);
        let medium_40 = get_recommendations("increasing_urgency", 40);
        let medium_69 = get_recommendations("increasing_urgency", 69);
        let high = get_recommendations("increasing_urgency", 70);

        assert_eq!(low[0], "Implement rapid decision-making processes and iteration cycles that accelerate execution");
        assert_eq!(medium_40, medium_69);
        assert_eq!(medium_40[0], "Develop a system for prioritizing urgent tasks and accelerating iteration cycles");
        assert_eq!(high[0], "Create mechanisms to identify and resolve bottlenecks in execution and innovation cycles");
    }

    #[test]
    fn test_every_catalog_cell_has_four_items() {
        for dimension in Catalog::standard().dimensions() {
            for band in [ScoreBand::Low, ScoreBand::Medium, ScoreBand::High] {
                let cell = recommendations_for(&dimension.id, band)
                    .unwrap_or_else(|| panic!("missing cell {} / {}", dimension.id, band));
                assert_eq!(cell.len(), 4);
            }
        }
    }

    #[test]
    fn test_unknown_dimension_gets_generic_list() {
        for score in [0, 55, 100] {
            let recs = get_recommendations("not_a_dimension", score);
            assert_eq!(recs.len(), 6);
            assert_eq!(recs, &GENERIC_RECOMMENDATIONS[..]);
        }
    }

    #[test]
    fn test_band_display() {
        assert_eq!(ScoreBand::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_string(&ScoreBand::High).unwrap(), "\"high\"");
    }
}
