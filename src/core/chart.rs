use crate::domain::model::{AggregateRow, Bar, BarChart};

pub const DEFAULT_CHART_TITLE: &str = "Salaire Moyen par Genre";
pub const X_LABEL: &str = "genre";
pub const Y_LABEL: &str = "salaire_moyen";

/// Qualitative palette, one color per gender in query order.
const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Builds the bar chart for one render: one bar per row, height = mean salary.
pub fn build_bar_chart(title: &str, rows: &[AggregateRow]) -> BarChart {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, row)| Bar {
            label: row.gender.clone(),
            value: row.mean_salary,
            color: color_for(i).to_string(),
        })
        .collect();

    BarChart {
        title: title.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gender: &str, mean_salary: f64) -> AggregateRow {
        AggregateRow {
            gender: gender.to_string(),
            mean_salary,
        }
    }

    #[test]
    fn test_one_bar_per_gender_with_distinct_colors() {
        let chart = build_bar_chart(
            DEFAULT_CHART_TITLE,
            &[row("F", 2800.0), row("M", 3000.0)],
        );

        assert_eq!(chart.title, "Salaire Moyen par Genre");
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].label, "F");
        assert_eq!(chart.bars[0].value, 2800.0);
        assert_eq!(chart.bars[1].value, 3000.0);
        assert_ne!(chart.bars[0].color, chart.bars[1].color);
    }

    #[test]
    fn test_empty_rows_give_empty_chart() {
        let chart = build_bar_chart(DEFAULT_CHART_TITLE, &[]);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.x_label, "genre");
        assert_eq!(chart.y_label, "salaire_moyen");
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(color_for(0), color_for(10));
    }
}
