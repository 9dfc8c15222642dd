//! Category bar chart
//!
//! The chart consumes the category-to-total mapping and nothing else, so any
//! renderer can be swapped in behind [`ChartRenderer`].

use std::collections::HashMap;

use crate::models::{Category, Money};

/// Something that turns category totals into a picture
pub trait ChartRenderer {
    fn render(&self, totals: &HashMap<Category, Money>) -> String;
}

/// Horizontal text bar chart, one bar per category
///
/// Labels sit to the left of each bar, so long category names never overlap.
/// Bars are scaled so the largest total fills `width` characters.
#[derive(Debug, Clone)]
pub struct TextBarChart {
    pub width: usize,
    pub currency_symbol: String,
}

const BAR: char = '█';

impl TextBarChart {
    pub fn new(width: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            width: width.max(1),
            currency_symbol: currency_symbol.into(),
        }
    }

    fn bar_length(&self, value: Money, max: Money) -> usize {
        if max.cents() <= 0 || value.cents() <= 0 {
            return 0;
        }
        let scaled = value.cents() as f64 / max.cents() as f64 * self.width as f64;
        // Any positive total gets at least one block
        (scaled.round() as usize).clamp(1, self.width)
    }
}

impl ChartRenderer for TextBarChart {
    fn render(&self, totals: &HashMap<Category, Money>) -> String {
        if totals.is_empty() {
            return "No expenses found for graphical summary.\n".to_string();
        }

        let mut rows: Vec<_> = totals.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let label_width = rows.iter().map(|(c, _)| c.as_str().chars().count()).max().unwrap_or(0);
        let max = rows.iter().map(|(_, m)| **m).max().unwrap_or_default();

        let mut output = String::from("Total Spending by Category\n");
        for (category, total) in rows {
            let bar: String = std::iter::repeat(BAR)
                .take(self.bar_length(*total, max))
                .collect();
            output.push_str(&format!(
                "{:<label_width$} | {} {}\n",
                category.as_str(),
                bar,
                total.format_with_symbol(&self.currency_symbol),
                label_width = label_width
            ));
        }
        output
    }
}
