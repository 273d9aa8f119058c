//! Row accumulator
//!
//! Widget sets append whole rows; the accumulator only keeps them in order.
//! Partitioning widgets so that a row fits [`GRID_WIDTH`] is the caller's job.
//!
//! [`GRID_WIDTH`]: super::widget::GRID_WIDTH

use super::widget::Widget;
use serde::{Deserialize, Serialize};

/// Widgets written together on one dashboard line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Widget>);

impl Row {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self(widgets)
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.0
    }

    /// Sum of widget widths
    pub fn width(&self) -> u32 {
        self.0.iter().map(Widget::width).sum()
    }

    /// Height of the tallest widget
    pub fn height(&self) -> u32 {
        self.0.iter().map(Widget::height).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row. Empty rows are dropped.
    pub fn add_row<I, W>(&mut self, widgets: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<Widget>,
    {
        let widgets: Vec<Widget> = widgets.into_iter().map(Into::into).collect();
        if widgets.is_empty() {
            return;
        }
        self.rows.push(Row::new(widgets));
    }

    /// Rows in append order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudwatch::widget::{GraphWidget, TextWidget};

    #[test]
    fn test_rows_keep_append_order() {
        let mut layout = Layout::new();
        layout.add_row([TextWidget::header("first".to_string())]);
        layout.add_row([
            GraphWidget::new("a").width(12),
            GraphWidget::new("b").width(12),
        ]);

        let rows = layout.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[1].widgets()[0].as_graph().unwrap().title, "a");
    }

    #[test]
    fn test_empty_row_is_ignored() {
        let mut layout = Layout::new();
        layout.add_row(Vec::<Widget>::new());
        assert!(layout.rows().is_empty());
    }

    #[test]
    fn test_row_width_and_height() {
        let mut layout = Layout::new();
        layout.add_row([
            GraphWidget::new("a").width(10).height(4),
            GraphWidget::new("b").width(4).height(6),
            GraphWidget::new("c").width(10),
        ]);
        let row = &layout.rows()[0];
        assert_eq!(row.width(), 24);
        assert_eq!(row.height(), 6);
    }

    #[test]
    fn test_overwide_row_is_kept_as_supplied() {
        let mut layout = Layout::new();
        layout.add_row([GraphWidget::new("a").width(20), GraphWidget::new("b").width(20)]);
        assert_eq!(layout.into_rows()[0].width(), 40);
    }
}
