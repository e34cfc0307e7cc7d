// ==========================================
// 最小 .xlsx 工作簿构造器 - 用于集成测试
// ==========================================
// 仅包含 calamine 读取工作表所需的部件
// 空字符串单元格不写出（与 Excel 的空白单元格一致）
// ==========================================

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::CompressionMethod;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// 按行构造单工作表 .xlsx（全部单元格为共享字符串）
pub fn build_xlsx(rows: &[Vec<&str>]) -> Vec<u8> {
    build_xlsx_sheets(&[rows])
}

/// 按顺序构造多工作表 .xlsx，工作表依次命名为 Sheet1、Sheet2 ...
pub fn build_xlsx_sheets(sheets: &[&[Vec<&str>]]) -> Vec<u8> {
    let mut shared: Vec<String> = Vec::new();
    let sheet_xml: Vec<String> = sheets
        .iter()
        .map(|rows| sheet_body(rows, &mut shared))
        .collect();

    let mut overrides = String::from(
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    );
    let mut sheet_entries = String::new();
    let mut rels = String::new();
    for idx in 1..=sheets.len() {
        overrides.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            idx
        ));
        sheet_entries.push_str(&format!(
            "<sheet name=\"Sheet{0}\" sheetId=\"{0}\" r:id=\"rId{0}\"/>",
            idx
        ));
        rels.push_str(&format!(
            "<Relationship Id=\"rId{0}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{0}.xml\"/>",
            idx
        ));
    }
    rels.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" Target=\"sharedStrings.xml\"/>",
        sheets.len() + 1
    ));

    let content_types = format!(
        r#"{}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
{}
</Types>"#,
        XML_DECL, overrides
    );
    let workbook = format!(
        r#"{}
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>{}</sheets>
</workbook>"#,
        XML_DECL, sheet_entries
    );
    let workbook_rels = format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        XML_DECL, rels
    );

    let items: String = shared
        .iter()
        .map(|s| format!("<si><t xml:space=\"preserve\">{}</t></si>", xml_escape(s)))
        .collect();
    let shared_strings = format!(
        r#"{0}
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{1}" uniqueCount="{1}">{2}</sst>"#,
        XML_DECL,
        shared.len(),
        items
    );

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types),
        ("_rels/.rels".to_string(), ROOT_RELS.to_string()),
        ("xl/workbook.xml".to_string(), workbook),
        ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels),
        ("xl/sharedStrings.xml".to_string(), shared_strings),
    ];
    for (idx, body) in sheet_xml.into_iter().enumerate() {
        parts.push((format!("xl/worksheets/sheet{}.xml", idx + 1), body));
    }

    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, body) in parts {
            zip.start_file(name, options).expect("写入 zip 条目失败");
            zip.write_all(body.as_bytes()).expect("写入 zip 内容失败");
        }
        zip.finish().expect("完成 zip 失败");
    }
    buf
}

fn sheet_body(rows: &[Vec<&str>], shared: &mut Vec<String>) -> String {
    let mut sheet_rows = String::new();

    for (row_idx, row) in rows.iter().enumerate() {
        let row_number = row_idx + 1;
        sheet_rows.push_str(&format!("<row r=\"{}\">", row_number));
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let string_idx = match shared.iter().position(|s| s == value) {
                Some(idx) => idx,
                None => {
                    shared.push(value.to_string());
                    shared.len() - 1
                }
            };
            sheet_rows.push_str(&format!(
                "<c r=\"{}{}\" t=\"s\"><v>{}</v></c>",
                column_letter(col_idx),
                row_number,
                string_idx
            ));
        }
        sheet_rows.push_str("</row>");
    }

    format!(
        r#"{}
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        XML_DECL, sheet_rows
    )
}

fn column_letter(idx: usize) -> char {
    (b'A' + idx as u8) as char
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
