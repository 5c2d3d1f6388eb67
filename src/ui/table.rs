use tabled::{settings::Style, Table, Tabled};
use crate::model::Category;
use crate::storage::DbStats;

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: usize,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Questions")]
    questions: usize,
}

/// Totals as a two-column table
pub fn stats_table(stats: &DbStats) -> String {
    let rows = [
        StatRow { metric: "Categories", value: stats.categories },
        StatRow { metric: "Questions", value: stats.questions },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One row per category with its question count. Empty input renders nothing.
pub fn category_table(counts: &[(Category, usize)]) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let rows = counts.iter().map(|(category, questions)| CategoryRow {
        id: category.id,
        category: category.kind.clone(),
        questions: *questions,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
