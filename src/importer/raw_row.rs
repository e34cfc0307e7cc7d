// ==========================================
// VisaFor/Heru - 原始行记录
// ==========================================
// 职责: 两种解码器的统一输出结构（小写列名 → 字符串值）
// 说明: 缺失列读取为空字符串；键顺序无意义
// ==========================================

use std::collections::HashMap;

// ==========================================
// LeadColumn - 已知列名
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadColumn {
    Name,
    Company,
    Email,
    Phone,
}

impl LeadColumn {
    /// 必填列（任一为空则整行跳过）
    pub const REQUIRED: [LeadColumn; 3] = [LeadColumn::Name, LeadColumn::Email, LeadColumn::Company];

    /// 模板列顺序
    pub const TEMPLATE_ORDER: [LeadColumn; 4] = [
        LeadColumn::Name,
        LeadColumn::Company,
        LeadColumn::Email,
        LeadColumn::Phone,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LeadColumn::Name => "name",
            LeadColumn::Company => "company",
            LeadColumn::Email => "email",
            LeadColumn::Phone => "phone",
        }
    }
}

// ==========================================
// RawRow - 原始行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入字段（键统一为 trim + 小写）
    ///
    /// 同名列重复出现时后者覆盖前者
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.trim().to_lowercase(), value.into());
    }

    /// 按列名读取，缺失返回空字符串
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// 读取已知列
    pub fn field(&self, column: LeadColumn) -> &str {
        self.get(column.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 所有值均为空白
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercased() {
        let row: RawRow = [(" Name ", "Jane"), ("EMAIL", "jane@x.com")]
            .into_iter()
            .collect();
        assert_eq!(row.field(LeadColumn::Name), "Jane");
        assert_eq!(row.get("email"), "jane@x.com");
        assert!(!row.contains_key("Name"));
    }

    #[test]
    fn test_missing_key_reads_empty() {
        let row = RawRow::new();
        assert_eq!(row.field(LeadColumn::Phone), "");
        assert!(row.is_blank());
    }
}
