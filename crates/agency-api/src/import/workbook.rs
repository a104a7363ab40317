//! 表格解码
//!
//! 支持 xlsx / xls / ods，首行为列标题，其后每一行转换为 [`ImportRow`]。

use std::io::Cursor;

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto_from_rs};
use chrono::Timelike;

use super::cells::{CellValue, ImportRow};
use crate::error::{AgencyError, Result};

/// 读取指定工作表的数据行
///
/// 空白单元格不进入行数据，所有单元格均为空白的行被跳过。
pub fn read_sheet(bytes: &[u8], sheet_name: &str) -> Result<Vec<ImportRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AgencyError::FileProcessing(format!("无法解析表格文件: {}", e)))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(AgencyError::FileProcessing(format!(
            "工作表不存在: {}",
            sheet_name
        )));
    }

    let range = workbook.worksheet_range(sheet_name)?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let labels: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();

    let mut result = Vec::new();
    for (offset, cells) in rows.enumerate() {
        // 标题行占一行，行号从 1 开始
        let mut row = ImportRow::new(first_row + offset + 2);
        for (label, cell) in labels.iter().zip(cells) {
            if label.is_empty() {
                continue;
            }
            if let Some(value) = cell_value(cell) {
                row.insert(label.clone(), value);
            }
        }
        if !row.is_empty() {
            result.push(row);
        }
    }

    Ok(result)
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(CellValue::Text(s.clone()))
        }
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(date_cell(dt)),
        Data::Error(_) | Data::Empty => None,
    }
}

/// 日期单元格按 ISO 8601 文本读取，零点时间只保留日期部分
fn date_cell(dt: &ExcelDateTime) -> CellValue {
    match dt.as_datetime() {
        Some(value) if dt.is_datetime() => {
            let text = if value.hour() == 0 && value.minute() == 0 && value.second() == 0 {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.format("%Y-%m-%dT%H:%M:%S").to_string()
            };
            CellValue::Text(text)
        }
        _ => CellValue::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn workbook_bytes(sheet: &str, header: &[&str], rows: &[Vec<Option<&str>>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (col, label) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *label).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if let Some(value) = value {
                    worksheet
                        .write_string(r as u32 + 1, col as u16, *value)
                        .unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_rows_and_skips_blank_cells() {
        let bytes = workbook_bytes(
            "Client Data",
            &["Company Name", "City"],
            &[
                vec![Some("Kopi Co"), Some("Ipoh")],
                vec![Some("Teh Tarik Bar"), None],
            ],
        );

        let rows = read_sheet(&bytes, "Client Data").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].text("City").as_deref(), Some("Ipoh"));
        assert_eq!(rows[1].row_number, 3);
        assert!(rows[1].get("City").is_none());
    }

    #[test]
    fn test_numbers_are_kept_as_numbers() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Influencer Data").unwrap();
        worksheet.write_string(0, 0, "Contact Number").unwrap();
        worksheet.write_string(0, 1, "Instagram Followers").unwrap();
        worksheet.write_number(1, 0, 60123456789.0).unwrap();
        worksheet.write_number(1, 1, 15300.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_sheet(&bytes, "Influencer Data").unwrap();
        assert_eq!(rows[0].text("Contact Number").as_deref(), Some("60123456789"));
        assert_eq!(rows[0].count("Instagram Followers"), 15300);
    }

    #[test]
    fn test_date_cells_are_read_as_iso_text() {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Client Data").unwrap();
        worksheet.write_string(0, 0, "Postcode").unwrap();
        worksheet.write_string(0, 1, "State").unwrap();
        worksheet
            .write_datetime_with_format(1, 0, &ExcelDateTime::from_ymd(2023, 3, 15).unwrap(), &date_format)
            .unwrap();
        worksheet.write_string(1, 1, "Perak").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_sheet(&bytes, "Client Data").unwrap();
        assert_eq!(rows[0].text("Postcode").as_deref(), Some("2023-03-15"));
        assert_eq!(rows[0].count("Postcode"), 0);
    }

    #[test]
    fn test_fully_blank_rows_are_skipped() {
        let bytes = workbook_bytes(
            "Client Data",
            &["Company Name"],
            &[vec![Some("A")], vec![None], vec![Some("C")]],
        );

        let rows = read_sheet(&bytes, "Client Data").unwrap();
        let numbers: Vec<usize> = rows.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, [2, 4]);
    }

    #[test]
    fn test_missing_sheet_is_file_processing_error() {
        let bytes = workbook_bytes("Other", &["A"], &[]);
        match read_sheet(&bytes, "Client Data") {
            Err(AgencyError::FileProcessing(msg)) => assert!(msg.contains("Client Data")),
            other => panic!("期望 FileProcessing，实际: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_bytes_are_file_processing_error() {
        let result = read_sheet(b"definitely not a spreadsheet", "Client Data");
        assert!(matches!(result, Err(AgencyError::FileProcessing(_))));
    }

    #[test]
    fn test_header_only_sheet_yields_no_rows() {
        let bytes = workbook_bytes("Client Data", &["Company Name"], &[]);
        assert!(read_sheet(&bytes, "Client Data").unwrap().is_empty());
    }
}
