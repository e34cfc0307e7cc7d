// ==========================================
// VisaFor/Heru - Excel 解码器
// ==========================================
// 职责: .xlsx 二进制内容 → RawRow 列表
// 规则: 仅读取第一个工作表；首行为表头；值统一转为 trim 后的字符串
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::lead_importer_trait::RowDecoder;
use crate::importer::raw_row::RawRow;
use calamine::{Reader, Xlsx};
use std::io::Cursor;

pub struct XlsxDecoder;

impl RowDecoder for XlsxDecoder {
    fn decode(&self, content: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::DecodeFailure("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_lowercase())
                .collect(),
            None => return Ok(Vec::new()),
        };

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();
            for (col_idx, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = data_row
                    .get(col_idx)
                    .map(|cell| cell.to_string().trim().to_string())
                    .unwrap_or_default();
                row.insert(header, value);
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_workbook_is_decode_failure() {
        let result = XlsxDecoder.decode(b"definitely not a zip archive");
        assert!(matches!(result, Err(ImportError::DecodeFailure(_))));
    }

    #[test]
    fn test_empty_buffer_is_decode_failure() {
        let result = XlsxDecoder.decode(&[]);
        assert!(matches!(result, Err(ImportError::DecodeFailure(_))));
    }
}
