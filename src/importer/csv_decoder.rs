// ==========================================
// VisaFor/Heru - CSV 解码器
// ==========================================
// 职责: 原始文本 → RawRow 列表（首行为表头）
// 规则:
// - 引号切换引用状态，引用内连续两个引号为转义的字面引号
// - 仅在引用外遇到 \n 时断行
// - \r 一律丢弃（引用内也丢弃）
// - 未闭合引号不报错，剩余文本均视为引用内容
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::lead_importer_trait::RowDecoder;
use crate::importer::raw_row::RawRow;

const QUOTE: char = '"';
const DELIMITER: char = ',';
const BOM: char = '\u{feff}';

pub struct CsvDecoder;

impl RowDecoder for CsvDecoder {
    fn decode(&self, content: &[u8]) -> ImportResult<Vec<RawRow>> {
        let text = String::from_utf8_lossy(content);
        Ok(self.decode_text(&text))
    }
}

impl CsvDecoder {
    /// 解码文本
    ///
    /// 表头单元格 trim + 小写；空白数据行跳过；缺失的尾部字段补空字符串
    pub fn decode_text(&self, text: &str) -> Vec<RawRow> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut lines = split_rows(text).into_iter();

        let headers: Vec<String> = match lines.next() {
            Some(header_line) => split_fields(&header_line)
                .iter()
                .map(|h| h.trim().to_lowercase())
                .collect(),
            None => return Vec::new(),
        };

        let mut records = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            let values = split_fields(&line);
            let mut row = RawRow::new();
            for (col_idx, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = values.get(col_idx).map(|v| v.trim()).unwrap_or("");
                row.insert(header, value);
            }
            records.push(row);
        }

        records
    }
}

/// 按行切分（引号感知）
///
/// 行文本保留引号字符，交由 split_fields 再次处理
pub fn split_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                // 转义引号：原样保留两个字符，不切换状态
                chars.next();
                current.push(QUOTE);
                current.push(QUOTE);
            }
            QUOTE => {
                in_quotes = !in_quotes;
                current.push(QUOTE);
            }
            '\n' if !in_quotes => rows.push(std::mem::take(&mut current)),
            '\r' => {}
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// 单行字段切分（引号感知）
///
/// 外层引号被移除，"" 折叠为 "
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                chars.next();
                current.push(QUOTE);
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Vec<RawRow> {
        CsvDecoder.decode_text(text)
    }

    #[test]
    fn test_basic_rows_keyed_by_lowercase_header() {
        let rows = decode("Name, Company ,EMAIL,phone\nJane Doe,Innovate Legal,jane@x.com,555-0001\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), "Jane Doe");
        assert_eq!(rows[0].get("company"), "Innovate Legal");
        assert_eq!(rows[0].get("email"), "jane@x.com");
        assert_eq!(rows[0].get("phone"), "555-0001");
    }

    #[test]
    fn test_quoted_field_with_comma_and_escaped_quote() {
        let rows = decode("name,company,email\n\"a, b \"\"c\"\"\",Acme,a@x.com\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), "a, b \"c\"");
        assert_eq!(rows[0].get("company"), "Acme");
    }

    #[test]
    fn test_newline_inside_quotes_stays_in_field() {
        let rows = decode("name,company,email\n\"Line1\nLine2\",Acme,a@x.com\nBob,Beta,b@x.com");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), "Line1\nLine2");
        assert_eq!(rows[1].get("name"), "Bob");
    }

    #[test]
    fn test_carriage_return_dropped_even_inside_quotes() {
        let rows = decode("name,company,email\r\n\"A\r\nB\",Acme,a@x.com\r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), "A\nB");
        assert_eq!(rows[0].get("email"), "a@x.com");
    }

    #[test]
    fn test_missing_trailing_fields_are_empty() {
        let rows = decode("name,company,email,phone\nJane,Acme\n");
        assert_eq!(rows[0].get("email"), "");
        assert_eq!(rows[0].get("phone"), "");
        assert!(rows[0].contains_key("phone"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let rows = decode("name,email\nJane,j@x.com,surplus\n");
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = decode("name,company,email\n\n   \nJane,Acme,j@x.com\n\n");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        assert!(decode("name,company,email\n").is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let rows = decode("name,company,email\n\"Jane,Acme,j@x.com\nBob,Beta,b@x.com\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), "Jane,Acme,j@x.com\nBob,Beta,b@x.com");
        assert_eq!(rows[0].get("email"), "");
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let rows = CsvDecoder
            .decode("\u{feff}name,company,email\nJane,Acme,j@x.com".as_bytes())
            .unwrap();
        assert_eq!(rows[0].get("name"), "Jane");
    }

    #[test]
    fn test_blank_header_column_ignored() {
        let rows = decode("name,,email,company\nJane,junk,j@x.com,Acme\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("email"), "j@x.com");
        assert_eq!(rows[0].get("company"), "Acme");
    }

    #[test]
    fn test_split_fields_preserves_empty_fields() {
        assert_eq!(split_fields(",a,,"), vec!["", "a", "", ""]);
    }
}
