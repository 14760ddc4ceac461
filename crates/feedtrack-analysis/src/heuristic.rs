//! Offline keyword heuristics.
//!
//! Matching is plain substring search over the lower-cased text, and groups
//! are checked in a fixed priority order: the first group with any hit wins.

use feedtrack_protocol::{
    Analysis, Category, FeedbackRecord, InsightResult, OFFLINE_MARKER, Sentiment,
};

/// Confidence reported for single-item heuristic labels.
pub const HEURISTIC_CONFIDENCE: u8 = 60;

/// Sentiment groups in priority order.
const SENTIMENT_RULES: &[(Sentiment, &[&str])] = &[
    (
        Sentiment::Positive,
        &["good", "great", "excellent", "love", "best", "improved"],
    ),
    (
        Sentiment::Negative,
        &["bad", "worst", "slow", "poor", "fail", "issue", "problem"],
    ),
];

/// Category groups in priority order.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Labs, &["lab", "computer", "pc"]),
    (
        Category::Teaching,
        &["class", "lecture", "teaching", "sir", "mam"],
    ),
    (Category::Hostel, &["food", "mess", "canteen"]),
    (Category::Exams, &["exam", "paper", "test"]),
    (Category::Facilities, &["fan", "light", "water", "clean"]),
];

/// Keywords counted as compliments in batch summaries.
const COMPLIMENT_KEYWORDS: &[&str] = &["good", "great", "excellent", "love"];
/// Keywords counted as complaints in batch summaries.
const COMPLAINT_KEYWORDS: &[&str] = &["bad", "worst", "poor", "fail"];

/// Issue tags reported when any of their keywords appear in a batch.
const ISSUE_RULES: &[(&str, &[&str])] = &[
    ("Lab Infrastructure", &["lab", "computer"]),
    ("Canteen Quality", &["mess", "food"]),
    ("Facility Maintenance", &["clean", "water"]),
];

const GENERIC_ISSUE: &str = "General Improvements needed";

/// Margin one side's count must exceed the other's by to set a trend.
const TREND_MARGIN: usize = 2;

/// Label one feedback text without any I/O.
pub fn classify(text: &str) -> Analysis {
    let lower = text.to_lowercase();
    let sentiment = first_match(&lower, SENTIMENT_RULES).unwrap_or(Sentiment::Neutral);
    let category = first_match(&lower, CATEGORY_RULES).unwrap_or(Category::Others);

    Analysis {
        sentiment,
        category,
        confidence: HEURISTIC_CONFIDENCE,
        highlights: vec![
            "Offline Analysis".to_string(),
            format!("{} feedback detected", sentiment.label()),
        ],
        summary: format!(
            "{OFFLINE_MARKER} This appears to be {} feedback regarding {category}.",
            sentiment.label().to_lowercase()
        ),
    }
}

/// Overall direction of a batch of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    MostlyPositive,
    NeedsAttention,
    Mixed,
}

impl Trend {
    /// Compare compliment and complaint counts.
    pub fn from_counts(positive: usize, negative: usize) -> Self {
        if positive > negative + TREND_MARGIN {
            Trend::MostlyPositive
        } else if negative > positive + TREND_MARGIN {
            Trend::NeedsAttention
        } else {
            Trend::Mixed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::MostlyPositive => "Mostly Positive",
            Trend::NeedsAttention => "Needs Attention",
            Trend::Mixed => "Mixed Feedback",
        }
    }
}

/// Summarize a batch without any I/O. Accepts any batch size, including
/// empty, which yields the generic placeholder issue.
pub fn summarize(batch: &[FeedbackRecord]) -> InsightResult {
    let combined = batch
        .iter()
        .map(|record| record.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let positive = count_hits(&combined, COMPLIMENT_KEYWORDS);
    let negative = count_hits(&combined, COMPLAINT_KEYWORDS);
    let trend = Trend::from_counts(positive, negative);

    let mut common_issues: Vec<String> = ISSUE_RULES
        .iter()
        .filter(|(_, keywords)| contains_any(&combined, keywords))
        .map(|(issue, _)| issue.to_string())
        .collect();
    if common_issues.is_empty() {
        common_issues.push(GENERIC_ISSUE.to_string());
    }

    InsightResult {
        common_issues,
        trends: format!(
            "{OFFLINE_MARKER} Detected {negative} complaints vs {positive} compliments. Trend: {}",
            trend.as_str()
        ),
        corrective_actions: vec![
            "Investigate reported issues".to_string(),
            "Conduct survey".to_string(),
        ],
        suggested_response: "We are reviewing all feedback.".to_string(),
    }
}

fn first_match<T: Copy>(text: &str, rules: &[(T, &[&str])]) -> Option<T> {
    rules
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(value, _)| *value)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Total occurrences of every keyword.
fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|keyword| text.matches(keyword).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{HEURISTIC_CONFIDENCE, Trend, classify, summarize};
    use chrono::Utc;
    use feedtrack_protocol::{Category, FeedbackDraft, FeedbackRecord, NewFeedback, Sentiment};
    use pretty_assertions::assert_eq;

    fn batch(texts: &[&str]) -> Vec<FeedbackRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let submission = NewFeedback {
                    text: text.to_string(),
                    student_id: format!("s-{idx}"),
                    student_name: "Student".to_string(),
                };
                FeedbackDraft::new(submission, classify(text))
                    .into_record(idx.to_string(), Utc::now())
            })
            .collect()
    }

    #[test]
    fn positive_group_wins_over_negative() {
        let analysis = classify("the food was good but the lab was bad");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
    }

    #[test]
    fn labs_wins_over_exams() {
        let analysis = classify("The lab exam was scheduled at night");
        assert_eq!(analysis.category, Category::Labs);
    }

    #[test]
    fn negative_and_default_labels() {
        let analysis = classify("Mess FOOD is the worst");
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.category, Category::Hostel);

        let analysis = classify("Nothing to report today");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.category, Category::Others);
    }

    #[test]
    fn category_priority_follows_rule_order() {
        assert_eq!(classify("lecture notes on paper").category, Category::Teaching);
        assert_eq!(classify("exam hall fan").category, Category::Exams);
        assert_eq!(classify("the water cooler").category, Category::Facilities);
    }

    #[test]
    fn output_is_templated_and_marked_offline() {
        let analysis = classify("Great teaching this week");
        assert_eq!(analysis.confidence, HEURISTIC_CONFIDENCE);
        assert_eq!(
            analysis.highlights,
            vec![
                "Offline Analysis".to_string(),
                "Positive feedback detected".to_string()
            ]
        );
        assert_eq!(
            analysis.summary,
            "[Offline] This appears to be positive feedback regarding Teaching."
        );
        assert!(analysis.is_offline());
    }

    #[test]
    fn classify_is_deterministic() {
        let text = "PC in lab 3 is slow";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn four_compliments_is_mostly_positive() {
        let insight = summarize(&batch(&["good lecture", "great and excellent", "love it"]));
        assert!(insight.trends.ends_with("Trend: Mostly Positive"), "{}", insight.trends);
        assert!(insight.trends.contains("Detected 0 complaints vs 4 compliments"));
    }

    #[test]
    fn one_of_each_is_mixed() {
        let insight = summarize(&batch(&["good class", "bad fan"]));
        assert!(insight.trends.ends_with("Trend: Mixed Feedback"));
    }

    #[test]
    fn many_complaints_need_attention() {
        assert_eq!(Trend::from_counts(0, 3), Trend::NeedsAttention);
        assert_eq!(Trend::from_counts(1, 3), Trend::Mixed);
        assert_eq!(Trend::from_counts(3, 0), Trend::MostlyPositive);
    }

    #[test]
    fn issue_tags_accumulate_in_order() {
        let insight = summarize(&batch(&["water leak", "computer broken", "mess is dirty"]));
        assert_eq!(
            insight.common_issues,
            vec![
                "Lab Infrastructure".to_string(),
                "Canteen Quality".to_string(),
                "Facility Maintenance".to_string(),
            ]
        );
    }

    #[test]
    fn no_specific_issue_yields_placeholder() {
        let insight = summarize(&batch(&["library hours are short"]));
        assert_eq!(
            insight.common_issues,
            vec!["General Improvements needed".to_string()]
        );
        assert_eq!(insight.suggested_response, "We are reviewing all feedback.");
    }
}
