//! Per-doctor disease analytics.
//!
//! Derives the aggregate tables and scalars the chart layer consumes from a
//! doctor's disease records. Rendering is out of scope here; the shapes are
//! plain label/count rows.

use serde::Serialize;

use crate::record::DiseaseRecord;

/// How many diseases the donut rollup keeps before folding into "Other".
const ROLLUP_TOP_N: usize = 5;

/// One row of a chart table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountRow {
    pub label: String,
    pub count: u64,
}

/// Share of total cases for one severity label.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeverityShare {
    pub severity: String,
    pub percentage: f64,
}

/// Aggregates derived from one doctor's disease records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseStats {
    pub total_cases: u64,
    pub unique_diseases: usize,
    /// Ties are broken by first-encountered order.
    pub most_common_disease: String,
    /// Diseases sorted descending by count.
    pub disease_table: Vec<CountRow>,
    /// Severities sorted ascending by count.
    pub severity_table: Vec<CountRow>,
    /// Per-severity share of total, rounded to two decimals.
    pub severity_percentages: Vec<SeverityShare>,
    /// Top diseases plus an "Other" row aggregating the remainder, when
    /// that remainder is positive.
    pub top_diseases: Vec<CountRow>,
}

impl DiseaseStats {
    /// Compute the aggregates, or `None` when the record set is empty,
    /// which callers treat as the no-data path.
    pub fn from_records(records: &[DiseaseRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut disease_counts: Vec<CountRow> = Vec::new();
        let mut severity_counts: Vec<CountRow> = Vec::new();
        for record in records {
            bump(&mut disease_counts, &record.disease);
            bump(&mut severity_counts, &record.severity);
        }

        let total = records.len() as u64;

        // Stable sorts keep first-encountered order among equal counts.
        let mut disease_table = disease_counts.clone();
        disease_table.sort_by(|a, b| b.count.cmp(&a.count));
        let mut severity_table = severity_counts.clone();
        severity_table.sort_by(|a, b| a.count.cmp(&b.count));

        let most_common_disease = disease_table[0].label.clone();

        let severity_percentages = severity_counts
            .iter()
            .map(|row| SeverityShare {
                severity: row.label.clone(),
                percentage: round2(row.count as f64 * 100.0 / total as f64),
            })
            .collect();

        let top_diseases = rollup(&disease_table, total);

        Some(Self {
            total_cases: total,
            unique_diseases: disease_counts.len(),
            most_common_disease,
            disease_table,
            severity_table,
            severity_percentages,
            top_diseases,
        })
    }
}

fn bump(counts: &mut Vec<CountRow>, label: &str) {
    match counts.iter_mut().find(|row| row.label == label) {
        Some(row) => row.count += 1,
        None => counts.push(CountRow {
            label: label.to_string(),
            count: 1,
        }),
    }
}

/// Keep the top N rows of a descending table and fold the rest into "Other".
fn rollup(sorted_desc: &[CountRow], total: u64) -> Vec<CountRow> {
    let mut top: Vec<CountRow> = sorted_desc.iter().take(ROLLUP_TOP_N).cloned().collect();
    let kept: u64 = top.iter().map(|row| row.count).sum();
    let other = total - kept;
    if other > 0 {
        top.push(CountRow {
            label: "Other".to_string(),
            count: other,
        });
    }
    top
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, severity: &str) -> DiseaseRecord {
        DiseaseRecord {
            disease: disease.to_string(),
            severity: severity.to_string(),
        }
    }

    fn records(groups: &[(&str, &str, usize)]) -> Vec<DiseaseRecord> {
        groups.iter()
            .flat_map(|&(d, s, n)| (0..n).map(move |_| record(d, s)))
            .collect()
    }

    #[test]
    fn empty_record_set_yields_none() {
        assert!(DiseaseStats::from_records(&[]).is_none());
    }

    #[test]
    fn seven_record_example() {
        let stats = DiseaseStats::from_records(&records(&[
            ("flu", "severe", 3),
            ("cold", "moderate", 2),
            ("migraine", "mild", 1),
            ("allergy", "mild", 1),
        ]))
        .unwrap();

        assert_eq!(stats.total_cases, 7);
        assert_eq!(stats.unique_diseases, 4);
        assert_eq!(stats.most_common_disease, "flu");
        assert_eq!(
            stats.disease_table[0],
            CountRow {
                label: "flu".to_string(),
                count: 3
            }
        );
        let severity_counts: Vec<u64> = stats.severity_table.iter().map(|r| r.count).collect();
        let mut expected = severity_counts.clone();
        expected.sort();
        assert_eq!(severity_counts, expected);
        // Only four diseases, so no "Other" row.
        assert_eq!(stats.top_diseases.len(), 4);
        assert!(stats.top_diseases.iter().all(|r| r.label != "Other"));
    }

    #[test]
    fn severity_percentages_are_rounded_shares_of_total() {
        let stats = DiseaseStats::from_records(&records(&[
            ("flu", "severe", 3),
            ("cold", "moderate", 2),
            ("migraine", "mild", 2),
        ]))
        .unwrap();

        let by_label = |label: &str| {
            stats
                .severity_percentages
                .iter()
                .find(|s| s.severity == label)
                .unwrap()
                .percentage
        };
        assert_eq!(by_label("severe"), 42.86);
        assert_eq!(by_label("moderate"), 28.57);
        assert_eq!(by_label("mild"), 28.57);

        let sum: f64 = stats.severity_percentages.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.05);
    }

    #[test]
    fn most_common_ties_break_to_first_encountered() {
        let stats = DiseaseStats::from_records(&records(&[
            ("cold", "mild", 2),
            ("flu", "mild", 2),
        ]))
        .unwrap();
        assert_eq!(stats.most_common_disease, "cold");
    }

    #[test]
    fn rollup_conserves_total_and_labels_the_remainder_other() {
        let stats = DiseaseStats::from_records(&records(&[
            ("a", "mild", 5),
            ("b", "mild", 4),
            ("c", "mild", 3),
            ("d", "mild", 2),
            ("e", "mild", 2),
            ("f", "mild", 1),
            ("g", "mild", 1),
        ]))
        .unwrap();

        assert_eq!(stats.top_diseases.len(), 6);
        let other = stats.top_diseases.last().unwrap();
        assert_eq!(other.label, "Other");
        assert_eq!(other.count, 2);

        let rolled: u64 = stats.top_diseases.iter().map(|r| r.count).sum();
        assert_eq!(rolled, stats.total_cases);
    }

    #[test]
    fn rollup_omits_other_when_nothing_remains() {
        let stats = DiseaseStats::from_records(&records(&[
            ("a", "mild", 2),
            ("b", "mild", 1),
            ("c", "mild", 1),
            ("d", "mild", 1),
            ("e", "mild", 1),
        ]))
        .unwrap();
        assert_eq!(stats.top_diseases.len(), 5);
        assert!(stats.top_diseases.iter().all(|r| r.label != "Other"));
    }

    #[test]
    fn round2_rounds_half_up_at_two_decimals() {
        assert_eq!(round2(42.857142), 42.86);
        assert_eq!(round2(28.571428), 28.57);
        assert_eq!(round2(100.0), 100.0);
    }
}
