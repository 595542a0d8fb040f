// file: src/exporter/json.rs
// description: json export of filtered search results

use crate::error::Result;
use crate::models::SearchResult;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serializes the retained results as a json array, in input order.
    pub fn render(&self, results: &[SearchResult]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(results)?
        } else {
            serde_json::to_string(results)?
        };

        Ok(json)
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_results() {
        let results = vec![
            SearchResult::new("One", "https://a.com/1", "alpha")
                .with_published_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()),
            SearchResult::new("Two", "https://b.com/2", ""),
        ];

        let json = JsonExporter::default().render(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["title"], "One");
        assert_eq!(value[0]["published_date"], "2025-01-02");
        assert_eq!(value[1]["url"], "https://b.com/2");
        assert!(value[1]["author"].is_null());
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_compact_render() {
        let json = JsonExporter::new(false).render(&[]).unwrap();
        assert_eq!(json, "[]");
    }
}
