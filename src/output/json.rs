use serde::Serialize;

use crate::core::{CountRow, FilterCriteria, SampleRow, ViewModel};
use crate::error::AppError;
use crate::output::cloud::{CloudTerm, cloud_terms};

#[derive(Serialize)]
struct DashboardJson<'a> {
    #[serde(flatten)]
    view: &'a ViewModel,
    /// Display-ready cloud; only present with the word cloud enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    word_cloud: Option<Vec<CloudTerm>>,
}

#[derive(Serialize)]
struct SectionJson<'a, T: Serialize> {
    criteria: &'a FilterCriteria,
    matched_records: usize,
    rows: &'a [T],
}

pub(crate) fn output_dashboard_json(view: &ViewModel) -> Result<String, AppError> {
    let doc = DashboardJson {
        view,
        word_cloud: view.title_words.as_deref().map(cloud_terms),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub(crate) fn output_sample_json(
    criteria: &FilterCriteria,
    matched_records: usize,
    rows: &[SampleRow],
) -> Result<String, AppError> {
    section(criteria, matched_records, rows)
}

pub(crate) fn output_counts_json<K: Serialize>(
    criteria: &FilterCriteria,
    matched_records: usize,
    rows: &[CountRow<K>],
) -> Result<String, AppError> {
    section(criteria, matched_records, rows)
}

fn section<T: Serialize>(
    criteria: &FilterCriteria,
    matched_records: usize,
    rows: &[T],
) -> Result<String, AppError> {
    let doc = SectionJson {
        criteria,
        matched_records,
        rows,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub(crate) fn output_journal_list_json(journals: &[String]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(journals)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JournalFilter, Record, ViewToggles, render};
    use crate::utils::parse_publish_date;
    use serde_json::Value;

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                Some("The covid study".into()),
                Some("J1".into()),
                parse_publish_date("2020-05-01"),
                Some("two words".into()),
                Some("A;B".into()),
            ),
            Record::new(
                Some("Flu paper".into()),
                None,
                parse_publish_date("2021-01-01"),
                None,
                None,
            ),
        ]
    }

    #[test]
    fn dashboard_json_flattens_view_model() {
        let view = render(&records(), &FilterCriteria::default(), ViewToggles::default());
        let json: Value = serde_json::from_str(&output_dashboard_json(&view).unwrap()).unwrap();

        assert_eq!(json["total_records"], 2);
        assert_eq!(json["matched_records"], 2);
        assert_eq!(json["criteria"]["year_min"], 2020);
        assert_eq!(json["criteria"]["journal"], Value::Null);
        assert_eq!(json["yearly"][0]["label"], 2020);
        assert_eq!(json["sample"][1]["journal"], Value::Null);

        let cloud = json["word_cloud"].as_array().unwrap();
        assert!(cloud.iter().all(|t| t["term"] != "the"));
        assert!(
            json["title_words"]
                .as_array()
                .unwrap()
                .iter()
                .any(|t| t["label"] == "the")
        );
    }

    #[test]
    fn disabled_views_serialize_as_null() {
        let toggles = ViewToggles {
            word_cloud: false,
            sources: false,
        };
        let view = render(&records(), &FilterCriteria::default(), toggles);
        let json: Value = serde_json::from_str(&output_dashboard_json(&view).unwrap()).unwrap();
        assert_eq!(json["title_words"], Value::Null);
        assert_eq!(json["sources"], Value::Null);
        assert!(json.get("word_cloud").is_none());
    }

    #[test]
    fn counts_json_carries_criteria() {
        let criteria = FilterCriteria::new(2019, 2020, JournalFilter::Exact("J1".into()));
        let rows = vec![CountRow::new("J1".to_string(), 3)];
        let json: Value =
            serde_json::from_str(&output_counts_json(&criteria, 3, &rows).unwrap()).unwrap();
        assert_eq!(json["criteria"]["journal"], "J1");
        assert_eq!(json["rows"][0]["count"], 3);
    }
}
