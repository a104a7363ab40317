//! 表格批量导入
//!
//! 解码表格 → 列映射 → 构建实体 → 逐行写入 → 汇总结果

pub mod cells;
pub mod columns;
pub mod reconciler;
pub mod workbook;

pub use cells::{CellValue, ImportRow, convert_number_to_int, parse_flag};
pub use columns::{ClientColumns, ImportConfig, InfluencerColumns, PlatformColumns};
pub use reconciler::{ImportReport, RowFailure, import_clients, import_influencers};
pub use workbook::read_sheet;
