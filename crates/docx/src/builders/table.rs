use super::{Paragraph, WordBuilder};
use dossier_package::XmlElement;
use dossier_types::Color;

/// Text width of an A4 page with 2 cm margins, in twips.
const DEFAULT_GRID_WIDTH: u32 = 9638;
/// `pct` widths are expressed in fiftieths of a percent.
const FULL_PCT: u32 = 5000;

/// Builder for a table cell. A cell must contain at least one paragraph; an
/// empty one is added on build when none was given.
#[derive(Default)]
pub struct Cell {
    width_pct: Option<u32>,
    shading: Option<Color>,
    children: Vec<Box<dyn WordBuilder>>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl WordBuilder + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn shading(mut self, fill: Color) -> Self {
        self.shading = Some(fill);
        self
    }

    fn with_width(mut self, width_pct: u32) -> Self {
        self.width_pct.get_or_insert(width_pct);
        self
    }
}

impl WordBuilder for Cell {
    fn build(self: Box<Self>) -> XmlElement {
        let mut tcpr = XmlElement::new("w:tcPr");
        if let Some(w) = self.width_pct {
            tcpr.push(XmlElement::new("w:tcW").attr("w:w", w.to_string()).attr("w:type", "pct"));
        }
        if let Some(fill) = self.shading {
            tcpr.push(
                XmlElement::new("w:shd")
                    .attr("w:val", "clear")
                    .attr("w:color", "auto")
                    .attr("w:fill", fill.to_hex()),
            );
        }
        let mut children: Vec<XmlElement> = self.children.into_iter().map(|c| c.build()).collect();
        if !children.iter().any(|c| c.name == "w:p") {
            children.push(Box::new(Paragraph::new()).build());
        }
        XmlElement::new("w:tc").child(tcpr).children(children)
    }
}

#[derive(Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }
}

/// Builder for a full-width `w:tbl` with single-line borders.
#[derive(Default)]
pub struct Table {
    columns: Vec<u32>,
    border: Option<Color>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column widths in fiftieths of a percent of the text width.
    pub fn columns(mut self, widths_pct: &[u32]) -> Self {
        self.columns = widths_pct.to_vec();
        self
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    fn borders(color: Color) -> XmlElement {
        let edges = ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"];
        XmlElement::new("w:tblBorders").children(edges.iter().map(|edge| {
            XmlElement::new(*edge)
                .attr("w:val", "single")
                .attr("w:sz", "4")
                .attr("w:space", "0")
                .attr("w:color", color.to_hex())
        }))
    }
}

impl WordBuilder for Table {
    fn build(self: Box<Self>) -> XmlElement {
        let tblpr = XmlElement::new("w:tblPr")
            .child(
                XmlElement::new("w:tblW")
                    .attr("w:w", FULL_PCT.to_string())
                    .attr("w:type", "pct"),
            )
            .maybe_child(self.border.map(Table::borders))
            .child(XmlElement::new("w:tblLayout").attr("w:type", "fixed"));

        let grid = XmlElement::new("w:tblGrid").children(self.columns.iter().map(|pct| {
            XmlElement::new("w:gridCol").attr("w:w", (DEFAULT_GRID_WIDTH * pct / FULL_PCT).to_string())
        }));

        let columns = self.columns;
        let rows = self.rows.into_iter().map(|row| {
            XmlElement::new("w:tr").children(row.cells.into_iter().enumerate().map(|(i, cell)| {
                let cell = match columns.get(i) {
                    Some(w) => cell.with_width(*w),
                    None => cell,
                };
                Box::new(cell).build()
            }))
        });

        XmlElement::new("w:tbl").child(tblpr).child(grid).children(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::Run;

    #[test]
    fn cells_take_column_widths_and_get_a_paragraph() {
        let table = Box::new(
            Table::new()
                .columns(&[2000, 3000])
                .border(Color::rgb(0xD0, 0xD0, 0xD0))
                .row(
                    Row::new()
                        .cell(Cell::new().shading(Color::rgb(0xEE, 0xF3, 0xF9)).child(Paragraph::new().run(Run::new("Alert ID"))))
                        .cell(Cell::new()),
                ),
        )
        .build();

        let grid: Vec<_> = table.find_children("w:tblGrid").next().unwrap().find_children("w:gridCol").collect();
        assert_eq!(grid[0].get_attr("w:w"), Some("3855"));
        assert_eq!(grid[1].get_attr("w:w"), Some("5782"));

        let row = table.find_children("w:tr").next().unwrap();
        let cells: Vec<_> = row.find_children("w:tc").collect();
        let tcw = cells[1].find_children("w:tcPr").next().unwrap().find_children("w:tcW").next().unwrap();
        assert_eq!(tcw.get_attr("w:w"), Some("3000"));
        assert_eq!(cells[1].find_children("w:p").count(), 1);
        let shd = cells[0].find_children("w:tcPr").next().unwrap().find_children("w:shd").next().unwrap();
        assert_eq!(shd.get_attr("w:fill"), Some("EEF3F9"));
    }
}
