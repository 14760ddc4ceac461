//! Dashboard counters and distributions.

use crate::error::ServiceError;
use crate::service::FeedbackService;
use feedtrack_protocol::{
    Category, DistributionEntry, FeedbackField, FeedbackFilter, Metrics, Sentiment,
};

/// Whole-percent share of `part` in `total`; 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Drop empty groups and order by count, largest first. Equal counts keep
/// their input order.
pub fn distribution(counts: Vec<(String, usize)>) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = counts
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(name, value)| DistributionEntry { name, value })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

impl FeedbackService {
    pub async fn metrics(&self) -> Result<Metrics, ServiceError> {
        let total_feedback = self.count(FeedbackFilter::all()).await?;
        let unique_students = self
            .with_store("distinct", |store| async move {
                store.distinct(FeedbackField::StudentId).await
            })
            .await?
            .len();
        let critical_issues = self.count(FeedbackFilter::critical()).await?;
        let positive = self
            .count(FeedbackFilter::sentiment(Sentiment::Positive))
            .await?;
        Ok(Metrics {
            total_feedback,
            unique_students,
            critical_issues,
            positive_score: percent(positive, total_feedback),
        })
    }

    pub async fn sentiment_distribution(&self) -> Result<Vec<DistributionEntry>, ServiceError> {
        let mut counts = Vec::with_capacity(Sentiment::ALL.len());
        for sentiment in Sentiment::ALL {
            let value = self.count(FeedbackFilter::sentiment(sentiment)).await?;
            counts.push((sentiment.as_str().to_string(), value));
        }
        Ok(distribution(counts))
    }

    pub async fn category_distribution(&self) -> Result<Vec<DistributionEntry>, ServiceError> {
        let mut counts = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let value = self.count(FeedbackFilter::category(category)).await?;
            counts.push((category.as_str().to_string(), value));
        }
        Ok(distribution(counts))
    }

    async fn count(&self, filter: FeedbackFilter) -> Result<usize, ServiceError> {
        let filter = &filter;
        self.with_store("count", move |store| async move { store.count(filter).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{distribution, percent};
    use pretty_assertions::assert_eq;

    #[test]
    fn percent_rounds_and_handles_empty() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn distribution_sorts_and_skips_zero() {
        let entries = distribution(vec![
            ("Teaching".to_string(), 1),
            ("Labs".to_string(), 0),
            ("Hostel".to_string(), 4),
            ("Exams".to_string(), 1),
        ]);
        let names: Vec<(&str, usize)> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.value))
            .collect();
        assert_eq!(names, vec![("Hostel", 4), ("Teaching", 1), ("Exams", 1)]);
    }
}
