use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};

use crate::config::SYSTEM_LABEL;

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADER_FILL: Color = Color::RGB(0x1A5276);
const MAX_COLUMN_WIDTH: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Int(v) => v.to_string().len(),
            CellValue::Float(v) => v.to_string().len(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// One worksheet: a styled header row, data rows and a trailing footer with
/// generation metadata.
pub struct ExcelTable {
    sheet_name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl ExcelTable {
    pub fn new(sheet_name: &str, headers: &[&str]) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell placement for the whole sheet: header row, data rows, one blank
    /// row, then the three footer rows. Header styling marks row 0 cells only.
    fn layout(&self, generated_at: &str) -> Vec<PlacedCell> {
        let mut cells = Vec::new();
        for (col, header) in self.headers.iter().enumerate() {
            cells.push(PlacedCell {
                row: 0,
                col: col as u16,
                value: CellValue::Text(header.clone()),
                header: true,
            });
        }

        for (i, row) in self.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                cells.push(PlacedCell {
                    row: (i + 1) as u32,
                    col: col as u16,
                    value: cell.clone(),
                    header: false,
                });
            }
        }

        let footer_row = (self.rows.len() + 2) as u32;
        let footer = [
            (footer_row, "Report generated:", CellValue::from(generated_at)),
            (footer_row + 1, "System:", CellValue::from(SYSTEM_LABEL)),
            (
                footer_row + 2,
                "Total records:",
                CellValue::Int(self.rows.len() as i64),
            ),
        ];
        for (row, label, value) in footer {
            cells.push(PlacedCell {
                row,
                col: 0,
                value: CellValue::from(label),
                header: false,
            });
            cells.push(PlacedCell {
                row,
                col: 1,
                value,
                header: false,
            });
        }

        cells
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_font_size(12)
            .set_background_color(HEADER_FILL)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let generated_at = Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
        for cell in self.layout(&generated_at) {
            if cell.header {
                if let CellValue::Text(text) = &cell.value {
                    worksheet.write_string_with_format(cell.row, cell.col, text, &header_format)?;
                }
                continue;
            }
            match &cell.value {
                CellValue::Text(s) => worksheet.write_string(cell.row, cell.col, s)?,
                CellValue::Int(v) => worksheet.write_number(cell.row, cell.col, *v as f64)?,
                CellValue::Float(v) => worksheet.write_number(cell.row, cell.col, *v)?,
            };
        }

        for (col, width) in column_widths(&self.headers, &self.rows)
            .into_iter()
            .enumerate()
        {
            worksheet.set_column_width(col as u16, width)?;
        }

        workbook.save_to_buffer()
    }
}

struct PlacedCell {
    row: u32,
    col: u16,
    value: CellValue,
    header: bool,
}

/// Longest content per column plus padding, capped.
pub fn column_widths(headers: &[String], rows: &[Vec<CellValue>]) -> Vec<f64> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let mut max_len = header.chars().count();
            for row in rows {
                if let Some(cell) = row.get(col) {
                    max_len = max_len.max(cell.display_len());
                }
            }
            ((max_len + 2) as f64).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

pub fn export_filename(tipo: &str) -> String {
    format!(
        "reporte_{}_{}.xlsx",
        tipo,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_longest_cell() {
        let headers = vec!["ID".to_string(), "Name".to_string()];
        let rows = vec![
            vec![CellValue::Int(7), CellValue::Text("Databases".to_string())],
            vec![CellValue::Int(12), CellValue::Text("OS".to_string())],
        ];
        let widths = column_widths(&headers, &rows);
        assert_eq!(widths, vec![4.0, 11.0]);
    }

    #[test]
    fn widths_are_capped() {
        let headers = vec!["Description".to_string()];
        let rows = vec![vec![CellValue::Text("x".repeat(200))]];
        assert_eq!(column_widths(&headers, &rows), vec![50.0]);
    }

    fn two_row_table() -> ExcelTable {
        let mut table = ExcelTable::new("Students", &["ID", "Name"]);
        table.push_row(vec![CellValue::Int(1), CellValue::Text("Ana".to_string())]);
        table.push_row(vec![CellValue::Int(2), CellValue::Text("Luis".to_string())]);
        table
    }

    #[test]
    fn header_styling_is_limited_to_the_first_row() {
        let cells = two_row_table().layout("01/06/2026 10:00:00");
        assert!(cells.iter().any(|c| c.header));
        assert!(cells.iter().filter(|c| c.header).all(|c| c.row == 0));
        assert!(cells.iter().filter(|c| c.row == 0).all(|c| c.header));
        assert!(cells.iter().filter(|c| c.row > 0).all(|c| !c.header));
    }

    #[test]
    fn footer_sits_below_a_blank_row_and_counts_records() {
        let cells = two_row_table().layout("01/06/2026 10:00:00");
        // 2 data rows after the header, row 3 stays blank, footer at 4..=6.
        assert!(cells.iter().all(|c| c.row != 3));
        let cell_at = |row: u32, col: u16| {
            &cells
                .iter()
                .find(|c| c.row == row && c.col == col)
                .unwrap()
                .value
        };
        assert_eq!(*cell_at(4, 0), CellValue::Text("Report generated:".to_string()));
        assert_eq!(*cell_at(4, 1), CellValue::Text("01/06/2026 10:00:00".to_string()));
        assert_eq!(*cell_at(5, 1), CellValue::Text(SYSTEM_LABEL.to_string()));
        assert_eq!(*cell_at(6, 0), CellValue::Text("Total records:".to_string()));
        assert_eq!(*cell_at(6, 1), CellValue::Int(2));
    }

    #[test]
    fn filename_carries_type_and_extension() {
        let name = export_filename("students");
        assert!(name.starts_with("reporte_students_"));
        assert!(name.ends_with(".xlsx"));
    }
}
