//! 表格行与单元格取值
//!
//! 空白单元格不会出现在行中；缺失的可选字段由调用方给出默认值。

use std::collections::HashMap;

use crate::error::{AgencyError, Result};
use crate::models::PLACEHOLDER;

/// 单元格原始值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 文本形式，整数值的浮点数不带小数部分（电话号码、邮编常被存成数字）
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// 表格中的一行数据：列标题 → 单元格值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow {
    /// 在工作表中的行号（从 1 开始，含标题行）
    pub row_number: usize,
    cells: HashMap<String, CellValue>,
}

impl ImportRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: HashMap::new(),
        }
    }

    pub fn with(mut self, label: impl Into<String>, value: CellValue) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        self.cells.insert(label.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.cells.get(label)
    }

    /// 非空文本值
    pub fn text(&self, label: &str) -> Option<String> {
        self.get(label)
            .map(CellValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// 必填列，缺失时整行失败
    pub fn required_text(&self, label: &str) -> Result<String> {
        self.text(label).ok_or_else(|| {
            AgencyError::Validation(format!("第 {} 行缺少必填列: {}", self.row_number, label))
        })
    }

    /// 可选文本列，缺失时使用 "-"
    pub fn text_or_placeholder(&self, label: &str) -> String {
        self.text(label).unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// 可选布尔列，缺失时为 false
    pub fn flag(&self, label: &str) -> bool {
        match self.get(label) {
            Some(CellValue::Bool(b)) => *b,
            Some(CellValue::Text(s)) => parse_flag(s),
            Some(CellValue::Number(_)) | None => false,
        }
    }

    /// 可选计数列，缺失时为 0
    pub fn count(&self, label: &str) -> i64 {
        match self.get(label) {
            Some(CellValue::Number(n)) => truncate(*n),
            Some(CellValue::Text(s)) => convert_number_to_int(s),
            Some(CellValue::Bool(_)) | None => 0,
        }
    }
}

/// "yes" / "true"（不区分大小写）为真，其余为假
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true")
}

/// 将计数文本转换为整数
///
/// 支持 k / m / b 后缀（不区分大小写），例如 "16k" → 16000、"2m" → 2000000、"1.5k" → 1500。
/// 千位分隔符会被忽略，无法解析的文本返回 0。
pub fn convert_number_to_int(value: &str) -> i64 {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let Some(last) = cleaned.chars().last() else {
        return 0;
    };

    let (digits, multiplier) = match last.to_ascii_lowercase() {
        'k' => (&cleaned[..cleaned.len() - 1], 1e3),
        'm' => (&cleaned[..cleaned.len() - 1], 1e6),
        'b' => (&cleaned[..cleaned.len() - 1], 1e9),
        _ => (cleaned.as_str(), 1.0),
    };

    digits
        .parse::<f64>()
        .map(|n| truncate(n * multiplier))
        .unwrap_or(0)
}

fn truncate(n: f64) -> i64 {
    if n.is_finite() { n.trunc() as i64 } else { 0 }
}
