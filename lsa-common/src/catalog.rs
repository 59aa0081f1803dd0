//! Question and dimension catalog
//!
//! The catalog is immutable static data built once per process and passed by
//! reference to the scoring engine, the recommendation selector and the CSV
//! formatter. Nothing reads it as an ambient global.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Error, Result};

/// One of the five leadership-behavior categories being assessed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,
    pub name: String,
    pub description: String,
    pub short_description: String,
    /// Reading list shown next to the results
    pub resources: Vec<String>,
}

impl Dimension {
    /// Name up to the first " & ", used as the CSV column heading
    ///
    /// "Raising Expectations & Rapid Experimentation" -> "Raising Expectations"
    pub fn headline(&self) -> &str {
        self.name.split(" & ").next().unwrap_or(&self.name)
    }
}

/// A single Likert-scale (1-5) prompt belonging to exactly one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub dimension_id: String,
    /// Principle the question illustrates
    pub principle: String,
}

/// Validated set of dimensions and the questions that belong to them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    dimensions: Vec<Dimension>,
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and questions whose dimension
    /// has no catalog entry
    pub fn new(dimensions: Vec<Dimension>, questions: Vec<Question>) -> Result<Self> {
        let mut dimension_ids = HashSet::new();
        for dimension in &dimensions {
            if !dimension_ids.insert(dimension.id.as_str()) {
                return Err(Error::Validation(format!(
                    "Duplicate dimension id: {}",
                    dimension.id
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(Error::Validation(format!(
                    "Duplicate question id: {}",
                    question.id
                )));
            }
            if !dimension_ids.contains(question.dimension_id.as_str()) {
                return Err(Error::Validation(format!(
                    "Question {} references unknown dimension {}",
                    question.id, question.dimension_id
                )));
            }
        }

        Ok(Self {
            dimensions,
            questions,
        })
    }

    /// The built-in leadership questionnaire
    pub fn standard() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions of one dimension, in catalog order
    pub fn questions_for<'a>(&'a self, dimension_id: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |q| q.dimension_id == dimension_id)
    }
}

static STANDARD_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    dimensions: standard_dimensions(),
    questions: standard_questions(),
});

fn dimension(
    id: &str,
    name: &str,
    description: &str,
    short_description: &str,
    resources: &[&str],
) -> Dimension {
    Dimension {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        short_description: short_description.to_string(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
    }
}

fn question(id: &str, dimension_id: &str, text: &str, principle: &str) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        dimension_id: dimension_id.to_string(),
        principle: principle.to_string(),
    }
}

fn standard_dimensions() -> Vec<Dimension> {
    vec![
        dimension(
            "raising_expectations",
            "Raising Expectations & Rapid Experimentation",
            "Ability to set higher standards, challenge the status quo, and promote rapid experimentation to unlock hidden potential.",
            "Setting higher standards and promoting experimentation",
            &[
                "Book: \"Amp It Up\" by Frank Slootman, chapter on Raising Expectations",
                "Book: \"The Geek Way\" by Andrew McAfee, sections on rapid experimentation",
                "Practice: Define ambitious goals that challenge your team while encouraging experimentation",
                "Exercise: Identify areas where rapid prototyping can exceed current performance",
                "Article: \"Setting Standards in High-Performance Teams\" - Harvard Business Review",
            ],
        ),
        dimension(
            "increasing_urgency",
            "Increasing Urgency & Speed",
            "Ability to accelerate decision-making and execution speed through rapid iteration cycles, creating momentum and driving faster results.",
            "Accelerating decision-making and execution cycles",
            &[
                "Book: \"Amp It Up\" by Frank Slootman, chapter on Speed as Competitive Advantage",
                "Book: \"The Geek Way\" by Andrew McAfee, sections on iteration velocity",
                "Practice: Implement shorter, more effective decision cycles",
                "Exercise: Identify and eliminate bureaucratic obstacles that slow execution",
                "Webinar: \"Speed as a Competitive Advantage in Modern Organizations\"",
                "Case Study: \"How Rapid Iteration Cycles Transform Organizations\"",
            ],
        ),
        dimension(
            "intensifying_commitment",
            "Intensifying Commitment & Cost-Effective Innovation",
            "Ability to generate higher levels of energy, focus, and determination while driving cost-effective innovation across all levels of the organization.",
            "Generating energy, focus, and cost-effective innovation",
            &[
                "Book: \"Amp It Up\" by Frank Slootman, chapter on Intensifying Commitment",
                "Book: \"The Geek Way\" by Andrew McAfee, sections on cost-effective innovation",
                "Practice: Connect daily work to meaningful purposes and clear deadlines",
                "Exercise: Develop team rituals that maintain intensity while promoting innovation",
                "Case Study: \"Building Commitment in High-Performance Innovation Teams\"",
                "Workshop: \"Elevating Energy Levels While Optimizing Resources\"",
            ],
        ),
        dimension(
            "transforming_conversations",
            "Transforming Conversations & Challenging Established Practices",
            "Ability to promote more intellectually intense discussions that question the status quo, challenge thinking, and drive innovation.",
            "Promoting intense discussions that challenge practices",
            &[
                "Book: \"Amp It Up\" by Frank Slootman, chapter on Transforming Conversations",
                "Book: \"The Geek Way\" by Andrew McAfee, sections on challenging established practices",
                "Practice: Implement Socratic questioning techniques in collaborative sessions",
                "Exercise: Train your team in constructive debate and intellectual collaboration skills",
                "Workshop: \"Effective Communication in High-Performance Organizations\"",
                "Article: \"The Power of Productive Debate and Challenging Assumptions\"",
            ],
        ),
        dimension(
            "data_driven_leadership",
            "Data-Driven Leadership & Leveraging Technology",
            "Ability to use data and commercial technology to guide decision-making and drive innovation, creating a culture of evidence-based leadership.",
            "Using data and technology to guide decisions",
            &[
                "Book: \"Amp It Up\" by Frank Slootman, chapter on Data, Decisions, and Direction",
                "Book: \"The Geek Way\" by Andrew McAfee, sections on leveraging commercial technology",
                "Practice: Establish key metrics dashboards that drive performance",
                "Exercise: Develop the ability to interpret data and extract actionable insights",
                "Online Course: \"Data-Driven Leadership in the Digital Age\"",
                "Case Study: \"How Leading Organizations Leverage Technology for Innovation\"",
            ],
        ),
    ]
}

fn standard_questions() -> Vec<Question> {
    vec![
        // Raising Expectations & Rapid Experimentation
        question(
            "q1_1",
            "raising_expectations",
            "Do I set higher standards that challenge my team to exceed their current performance levels?",
            "Raising Expectations: Setting ambitious goals that challenge the organization",
        ),
        question(
            "q1_2",
            "raising_expectations",
            "Do I encourage my team to challenge the status quo through rapid experimentation?",
            "The Geek Way: Promoting rapid experimentation to discover breakthroughs",
        ),
        question(
            "q1_3",
            "raising_expectations",
            "Do I create an environment where failure is seen as a learning opportunity in the pursuit of excellence?",
            "The Geek Way: Embracing productive failure as part of the innovation process",
        ),
        question(
            "q1_4",
            "raising_expectations",
            "Do I identify and unlock hidden potential in my team through high standards and clear expectations?",
            "Amp It Up: Uncovering untapped capabilities through elevated standards",
        ),
        // Increasing Urgency & Speed
        question(
            "q2_1",
            "increasing_urgency",
            "Do I create a sense of urgency that drives my team to make decisions and execute quickly?",
            "Amp It Up: Generating momentum for immediate action",
        ),
        question(
            "q2_2",
            "increasing_urgency",
            "Do I implement rapid iteration cycles that accelerate learning and improvement?",
            "The Geek Way: Using rapid iterations to accelerate development and innovation",
        ),
        question(
            "q2_3",
            "increasing_urgency",
            "Do I eliminate bureaucratic obstacles that slow down decision-making and execution?",
            "Amp It Up: Removing barriers to rapid action",
        ),
        question(
            "q2_4",
            "increasing_urgency",
            "Do I prioritize speed as a competitive advantage in my leadership approach?",
            "Amp It Up & The Geek Way: Treating speed as a critical competitive differentiator",
        ),
        // Intensifying Commitment & Cost-Effective Innovation
        question(
            "q3_1",
            "intensifying_commitment",
            "Do I generate higher levels of energy and focus to accelerate results?",
            "Amp It Up: Elevating collective energy for faster execution",
        ),
        question(
            "q3_2",
            "intensifying_commitment",
            "Do I promote cost-effective innovation that maximizes impact with minimal resources?",
            "The Geek Way: Driving innovation with resource efficiency",
        ),
        question(
            "q3_3",
            "intensifying_commitment",
            "Do I maintain intensity and focus on outcomes even during difficult or complex projects?",
            "Amp It Up: Maintaining determination when facing obstacles",
        ),
        question(
            "q3_4",
            "intensifying_commitment",
            "Do I encourage teams to find innovative solutions that deliver more value at lower cost?",
            "The Geek Way: Pursuing innovation that optimizes resource utilization",
        ),
        // Transforming Conversations & Challenging Established Practices
        question(
            "q4_1",
            "transforming_conversations",
            "Do I promote intellectually intense discussions that challenge conventional thinking?",
            "Amp It Up: Elevating dialogue quality through intellectual challenge",
        ),
        question(
            "q4_2",
            "transforming_conversations",
            "Do I ask probing questions that challenge assumptions and established practices?",
            "The Geek Way & Amp It Up: Using questioning to challenge the status quo",
        ),
        question(
            "q4_3",
            "transforming_conversations",
            "Do I facilitate productive debates that lead to better decisions and innovative solutions?",
            "Amp It Up: Converting debate into action and innovation",
        ),
        question(
            "q4_4",
            "transforming_conversations",
            "Do I create collaborative environments where challenging established practices is encouraged?",
            "The Geek Way: Building a culture that questions established norms",
        ),
        // Data-Driven Leadership & Leveraging Technology
        question(
            "q5_1",
            "data_driven_leadership",
            "Do I use data to inform strategic decisions and drive organizational performance?",
            "Amp It Up: Using evidence to guide strategic direction",
        ),
        question(
            "q5_2",
            "data_driven_leadership",
            "Do I effectively leverage commercial technology to drive innovation and competitive advantage?",
            "The Geek Way: Adopting and adapting commercial technology for innovation",
        ),
        question(
            "q5_3",
            "data_driven_leadership",
            "Do I promote a culture where data is used to learn, improve, and innovate?",
            "Amp It Up: Creating a data-informed culture",
        ),
        question(
            "q5_4",
            "data_driven_leadership",
            "Do I use technology and data to identify opportunities for innovation and competitive advantage?",
            "The Geek Way & Amp It Up: Leveraging data and technology to uncover new opportunities",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.dimensions().len(), 5);
        assert_eq!(catalog.questions().len(), 20);

        for dimension in catalog.dimensions() {
            assert_eq!(
                catalog.questions_for(&dimension.id).count(),
                4,
                "{} should have 4 questions",
                dimension.id
            );
        }
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard();
        let rebuilt = Catalog::new(catalog.dimensions().to_vec(), catalog.questions().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_headlines_match_csv_columns() {
        let headlines: Vec<&str> = Catalog::standard()
            .dimensions()
            .iter()
            .map(|d| d.headline())
            .collect();
        assert_eq!(
            headlines,
            vec![
                "Raising Expectations",
                "Increasing Urgency",
                "Intensifying Commitment",
                "Transforming Conversations",
                "Data-Driven Leadership",
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_dimension() {
        let dims = vec![dimension("a", "A", "", "", &[])];
        let questions = vec![question("q1", "b", "?", "")];
        let err = Catalog::new(dims, questions).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_rejects_duplicate_question() {
        let dims = vec![dimension("a", "A", "", "", &[])];
        let questions = vec![question("q1", "a", "?", ""), question("q1", "a", "?", "")];
        assert!(Catalog::new(dims, questions).is_err());
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.question("q3_2").map(|q| q.dimension_id.as_str()),
            Some("intensifying_commitment")
        );
        assert!(catalog.dimension("data_driven_leadership").is_some());
        assert!(catalog.dimension("unknown").is_none());
    }
}
